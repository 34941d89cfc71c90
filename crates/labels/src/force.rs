use std::collections::BTreeMap;

use foundation::ids::LabelId;
use foundation::math::Vec2;
use runtime::Frame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Required screen-space gap between label boxes.
    #[serde(default = "default_clearance")]
    pub min_clearance_px: f64,
    /// Repulsion acceleration per pixel of overlap depth (px/s²).
    #[serde(default = "default_repulsion")]
    pub repulsion: f64,
    /// Spring acceleration per pixel of displacement from rest (px/s²).
    /// Applied only to labels currently in collision.
    #[serde(default = "default_spring")]
    pub spring: f64,
    /// Exponential velocity damping rate (1/s).
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Maximum displacement from the rest offset.
    #[serde(default = "default_max_offset")]
    pub max_offset_px: f64,
    /// The frame loop stops once every label is slower than this (px/s).
    #[serde(default = "default_settle_eps")]
    pub settle_speed_eps: f64,
}

fn default_clearance() -> f64 {
    2.0
}
fn default_repulsion() -> f64 {
    40.0
}
fn default_spring() -> f64 {
    10.0
}
fn default_damping() -> f64 {
    6.0
}
fn default_max_offset() -> f64 {
    48.0
}
fn default_settle_eps() -> f64 {
    0.5
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            min_clearance_px: default_clearance(),
            repulsion: default_repulsion(),
            spring: default_spring(),
            damping: default_damping(),
            max_offset_px: default_max_offset(),
            settle_speed_eps: default_settle_eps(),
        }
    }
}

/// One simulated label.
///
/// `anchor_px` is the projected marker position (recomputed on camera
/// move); the label box is centered at `anchor + offset`. `rest_offset_px`
/// is where the label wants to sit relative to its anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub anchor_px: Vec2,
    pub offset_px: Vec2,
    pub velocity_px: Vec2,
    pub rest_offset_px: Vec2,
    pub half_size_px: Vec2,
}

impl LabelNode {
    pub fn center(&self) -> Vec2 {
        self.anchor_px.add(self.offset_px)
    }
}

/// Iterative relaxation nudging overlapping labels apart.
///
/// The loop is convergence-terminated, not fixed-count: `tick` keeps
/// integrating until the fastest label drops below `settle_speed_eps` and
/// no pair is left inside the clearance gap, then reports itself settled
/// and stops doing work until `update_anchor` or `start` re-arm it.
#[derive(Debug)]
pub struct LabelForceSim {
    config: ForceConfig,
    nodes: BTreeMap<LabelId, LabelNode>,
    running: bool,
}

impl LabelForceSim {
    pub fn new(config: ForceConfig) -> Self {
        Self {
            config,
            nodes: BTreeMap::new(),
            running: false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn node(&self, id: LabelId) -> Option<&LabelNode> {
        self.nodes.get(&id)
    }

    /// Current on-screen position of a label's center.
    pub fn position(&self, id: LabelId) -> Option<Vec2> {
        self.nodes.get(&id).map(LabelNode::center)
    }

    pub fn register(&mut self, id: LabelId, anchor_px: Vec2, rest_offset_px: Vec2, half_size_px: Vec2) {
        self.nodes.insert(
            id,
            LabelNode {
                anchor_px,
                offset_px: rest_offset_px,
                velocity_px: Vec2::ZERO,
                rest_offset_px,
                half_size_px,
            },
        );
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.running = false;
    }

    /// Re-anchors a label after a camera move and re-arms the loop.
    pub fn update_anchor(&mut self, id: LabelId, anchor_px: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.anchor_px = anchor_px;
            self.running = true;
        }
    }

    /// True if any pair of label boxes is closer than the clearance.
    pub fn any_overlap(&self) -> bool {
        let ids: Vec<LabelId> = self.nodes.keys().copied().collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                if self
                    .overlap_depth(&self.nodes[a], &self.nodes[b])
                    .is_some()
                {
                    return true;
                }
            }
        }
        false
    }

    /// One integration step. Returns `true` while the sim is still moving;
    /// `false` once settled (and thereafter, until re-armed).
    pub fn tick(&mut self, frame: Frame) -> bool {
        if !self.running || self.nodes.len() < 2 {
            self.running = false;
            return false;
        }
        let dt = frame.dt_s;
        if dt <= 0.0 {
            return true;
        }

        let ids: Vec<LabelId> = self.nodes.keys().copied().collect();
        let mut accel: BTreeMap<LabelId, Vec2> = ids.iter().map(|id| (*id, Vec2::ZERO)).collect();
        let mut colliding: BTreeMap<LabelId, bool> = ids.iter().map(|id| (*id, false)).collect();

        for (i, ia) in ids.iter().enumerate() {
            for ib in &ids[i + 1..] {
                let (a, b) = (&self.nodes[ia], &self.nodes[ib]);
                let Some(depth) = self.overlap_depth(a, b) else {
                    continue;
                };
                // Push apart along the inter-center direction; coincident
                // centers break the tie along +x deterministically (id order).
                let dir = b.center().sub(a.center()).normalize_or(Vec2::new(1.0, 0.0));
                let push = dir.scale(self.config.repulsion * depth);
                let pushed_a = accel[ia].sub(push);
                let pushed_b = accel[ib].add(push);
                accel.insert(*ia, pushed_a);
                accel.insert(*ib, pushed_b);
                colliding.insert(*ia, true);
                colliding.insert(*ib, true);
            }
        }

        let damp = (-self.config.damping * dt).exp();
        let mut max_speed = 0.0f64;
        for id in &ids {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let mut a = accel[id];
            if colliding[id] {
                // Spring back toward rest only while in collision; settled
                // labels keep their displaced spot instead of drifting.
                a = a.add(node.rest_offset_px.sub(node.offset_px).scale(self.config.spring));
            }
            node.velocity_px = node.velocity_px.add(a.scale(dt)).scale(damp);
            node.offset_px = node.offset_px.add(node.velocity_px.scale(dt));

            // Clamp total displacement from rest to a fixed radius.
            let excursion = node.offset_px.sub(node.rest_offset_px).clamp_length(self.config.max_offset_px);
            node.offset_px = node.rest_offset_px.add(excursion);

            max_speed = max_speed.max(node.velocity_px.length());
        }

        if max_speed < self.config.settle_speed_eps {
            if self.any_overlap() {
                // The spring can balance the repulsion before the boxes
                // clear; resolve the remainder positionally and keep going.
                self.separate_stalled_pairs();
                return true;
            }
            self.running = false;
            for node in self.nodes.values_mut() {
                node.velocity_px = Vec2::ZERO;
            }
            return false;
        }
        true
    }

    /// Shifts each still-overlapping pair apart along its thinnest overlap
    /// axis, respecting the excursion clamp. Only reached once the forces
    /// have stalled, so the shift cannot fight the integrator.
    fn separate_stalled_pairs(&mut self) {
        let ids: Vec<LabelId> = self.nodes.keys().copied().collect();
        for (i, ia) in ids.iter().enumerate() {
            for ib in &ids[i + 1..] {
                let (a, b) = (&self.nodes[ia], &self.nodes[ib]);
                let Some(depth) = self.overlap_depth(a, b) else {
                    continue;
                };
                let d = b.center().sub(a.center());
                let reach_x = a.half_size_px.x + b.half_size_px.x + self.config.min_clearance_px;
                let reach_y = a.half_size_px.y + b.half_size_px.y + self.config.min_clearance_px;
                let ox = reach_x - d.x.abs();
                let oy = reach_y - d.y.abs();
                // Thinnest axis; coincident centers split along +x (id order).
                let dir = if ox <= oy {
                    Vec2::new(if d.x >= 0.0 { 1.0 } else { -1.0 }, 0.0)
                } else {
                    Vec2::new(0.0, if d.y >= 0.0 { 1.0 } else { -1.0 })
                };
                let shift = dir.scale(depth * 0.5 + 0.5);
                self.shift_offset(*ia, shift.scale(-1.0));
                self.shift_offset(*ib, shift);
            }
        }
    }

    fn shift_offset(&mut self, id: LabelId, delta: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.offset_px = node.offset_px.add(delta);
            let excursion = node
                .offset_px
                .sub(node.rest_offset_px)
                .clamp_length(self.config.max_offset_px);
            node.offset_px = node.rest_offset_px.add(excursion);
        }
    }

    /// Overlap depth between two label boxes including the clearance gap,
    /// or `None` when they are already far enough apart.
    fn overlap_depth(&self, a: &LabelNode, b: &LabelNode) -> Option<f64> {
        let d = b.center().sub(a.center());
        let reach_x = a.half_size_px.x + b.half_size_px.x + self.config.min_clearance_px;
        let reach_y = a.half_size_px.y + b.half_size_px.y + self.config.min_clearance_px;
        let ox = reach_x - d.x.abs();
        let oy = reach_y - d.y.abs();
        if ox > 0.0 && oy > 0.0 {
            Some(ox.min(oy))
        } else {
            None
        }
    }
}
