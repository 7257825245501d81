use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::camera::Camera;
use super::sprite::LabelSprite;
use super::types::GraphData;

/// Ordinal palette for automatic coloring by group.
const COLORS: &[&str] = &[
	"#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
	"#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];
pub const DEFAULT_NODE_COLOR: &str = "#2196f3";

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 8.0;
pub const LINK_WIDTH: f64 = 1.0;
pub const LINK_OPACITY: f64 = 0.5;
pub const PARTICLE_WIDTH: f64 = 1.0;
/// Fraction of a link a particle travels per second.
pub const PARTICLE_SPEED: f64 = 0.6;
/// Pointer travel, in pixels, below which a press on a node counts as a click.
const CLICK_SLOP: f64 = 3.0;
const SEED_RADIUS: f64 = 100.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub sprite: Option<LabelSprite>,
}

/// Assigns palette colors to group keys in order of first appearance.
#[derive(Debug, Default)]
pub struct GroupColors {
	seen: Vec<String>,
}

impl GroupColors {
	pub fn color_for(&mut self, key: &str) -> &'static str {
		let pos = match self.seen.iter().position(|k| k == key) {
			Some(pos) => pos,
			None => {
				self.seen.push(key.to_string());
				self.seen.len() - 1
			}
		};
		COLORS[pos % COLORS.len()]
	}
}

/// What the pointer is currently doing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	DragNode {
		idx: DefaultNodeIdx,
		start_x: f64,
		start_y: f64,
		moved: bool,
	},
	Pan {
		last_x: f64,
		last_y: f64,
	},
	Orbit {
		last_bearing: f64,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressKind {
	Primary,
	Pan,
}

/// Seconds the pointer must rest on a node before its highlight starts.
const HOVER_DELAY: f64 = 0.08;
const FADE_IN_RATE: f64 = 1.8;
const FADE_OUT_RATE: f64 = 1.26;
const FADE_FLOOR: f64 = 0.01;

/// The hovered node with its neighbours, plus a highlight strength in `[0, 1]`
/// that eases in after [`HOVER_DELAY`] and fades out once the pointer leaves.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	/// Last hovered node and neighbours, still drawn while fading out.
	fading: Option<(DefaultNodeIdx, HashSet<DefaultNodeIdx>)>,
	waited: f64,
}

impl HoverState {
	/// Move the pointer onto `node`, or off every node with `None`.
	fn focus(&mut self, node: Option<DefaultNodeIdx>, neighbors: HashSet<DefaultNodeIdx>) {
		let left = self.node.take().map(|n| (n, std::mem::take(&mut self.neighbors)));
		if node.is_some() {
			if left.is_none() {
				self.waited = 0.0;
			}
			self.fading = None;
		} else {
			self.fading = left;
		}
		self.node = node;
		self.neighbors = neighbors;
	}

	/// Whether `idx` is drawn highlighted.
	pub fn lit(&self, idx: DefaultNodeIdx) -> bool {
		self.node == Some(idx)
			|| self.neighbors.contains(&idx)
			|| self
				.fading
				.as_ref()
				.is_some_and(|(n, around)| *n == idx || around.contains(&idx))
	}

	/// Whether `idx` is the node the highlight is centred on.
	pub fn centred_on(&self, idx: DefaultNodeIdx) -> bool {
		self.node == Some(idx) || self.fading.as_ref().is_some_and(|(n, _)| *n == idx)
	}

	pub fn active(&self) -> bool {
		self.node.is_some() || self.fading.is_some()
	}

	/// Advance the easing by `dt` seconds.
	pub fn step(&mut self, dt: f64) {
		if self.node.is_some() {
			self.waited = (self.waited + dt).min(HOVER_DELAY);
			if self.waited >= HOVER_DELAY {
				self.highlight_t += (1.0 - self.highlight_t) * FADE_IN_RATE * dt;
			}
			return;
		}
		self.highlight_t -= self.highlight_t * FADE_OUT_RATE * dt;
		if self.highlight_t < FADE_FLOOR {
			self.highlight_t = 0.0;
			self.fading = None;
		}
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub camera: Camera,
	pub gesture: Gesture,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut groups = GroupColors::default();
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				debug!("duplicate node id {}, keeping the first", node.id);
				continue;
			}
			let color = match (&node.color, node.group_key()) {
				(Some(color), _) if !color.is_empty() => color.clone(),
				(_, Some(key)) => groups.color_for(&key).to_string(),
				_ => DEFAULT_NODE_COLOR.to_string(),
			};
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (SEED_RADIUS * angle.cos()) as f32,
				y: (SEED_RADIUS * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.display_label().to_string(),
					color,
					sprite: None,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(src, tgt, EdgeData::default());
					edges.push((src, tgt));
				}
				_ => debug!("skipping link {} -> {}: unknown endpoint", link.source, link.target),
			}
		}

		Self {
			graph,
			edges,
			camera: Camera::new(width, height),
			gesture: Gesture::Idle,
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn node_count(&self) -> usize {
		let mut n = 0;
		self.graph.visit_nodes(|_| n += 1);
		n
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Build label sprites for every node with `make`.
	pub fn attach_sprites(&mut self, mut make: impl FnMut(&str) -> Option<LabelSprite>) {
		self.graph.visit_nodes_mut(|node| {
			node.data.user_data.sprite = make(&node.data.user_data.label);
		});
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.camera.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Pointer went down at screen `(x, y)`.
	pub fn press(&mut self, x: f64, y: f64, kind: PressKind) {
		self.camera.hold();
		self.gesture = match (kind, self.node_at_position(x, y)) {
			(PressKind::Primary, Some(idx)) => Gesture::DragNode {
				idx,
				start_x: x,
				start_y: y,
				moved: false,
			},
			(PressKind::Primary, None) => Gesture::Orbit {
				last_bearing: self.camera.bearing(x, y),
			},
			(PressKind::Pan, _) => Gesture::Pan {
				last_x: x,
				last_y: y,
			},
		};
	}

	/// Pointer moved to screen `(x, y)`.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		match &mut self.gesture {
			Gesture::Idle => {
				let hovered = self.node_at_position(x, y);
				self.set_hover(hovered);
			}
			Gesture::DragNode {
				idx,
				start_x,
				start_y,
				moved,
			} => {
				if !*moved && (x - *start_x).hypot(y - *start_y) < CLICK_SLOP {
					return;
				}
				*moved = true;
				let idx = *idx;
				let (gx, gy) = self.camera.screen_to_graph(x, y);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = gx as f32;
						node.data.y = gy as f32;
						node.data.is_anchor = true;
					}
				});
			}
			Gesture::Pan { last_x, last_y } => {
				let (dx, dy) = (x - *last_x, y - *last_y);
				(*last_x, *last_y) = (x, y);
				self.camera.pan_by(dx, dy);
			}
			Gesture::Orbit { last_bearing } => {
				let bearing = self.camera.bearing(x, y);
				let mut delta = bearing - *last_bearing;
				if delta > PI {
					delta -= 2.0 * PI;
				} else if delta < -PI {
					delta += 2.0 * PI;
				}
				*last_bearing = bearing;
				self.camera.rotate_by(delta);
			}
		}
	}

	/// Pointer went up. Returns the id of a node that was clicked rather than dragged.
	pub fn release(&mut self) -> Option<String> {
		self.camera.release();
		match std::mem::take(&mut self.gesture) {
			Gesture::DragNode {
				idx, moved: false, ..
			} => self.node_id(idx),
			_ => None,
		}
	}

	/// Pointer left the canvas; abandons any gesture without clicking.
	pub fn cancel(&mut self) {
		self.camera.release();
		self.gesture = Gesture::Idle;
		self.set_hover(None);
	}

	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.camera.zoom_at(x, y, factor);
	}

	fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let neighbors = match node {
			Some(idx) => self
				.edges
				.iter()
				.filter_map(|&(src, tgt)| match (src == idx, tgt == idx) {
					(true, _) => Some(tgt),
					(_, true) => Some(src),
					_ => None,
				})
				.collect(),
			None => HashSet::new(),
		};
		self.hover.focus(node, neighbors);
	}

	/// Where along its link a particle sits at the current time, in `[0, 1)`.
	pub fn particle_progress(&self) -> f64 {
		(self.flow_time * PARTICLE_SPEED).fract()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.camera.step();
		self.flow_time += dt as f64;
		self.hover.step(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.camera.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn sample() -> GraphData {
		serde_json::from_value(json!({
			"nodes": [
				{ "id": "/docs", "label": "docs", "color": "rgba(93, 109, 126, 0.8)" },
				{ "id": "/docs/a.txt", "group": "text" },
				{ "id": "/docs/b.txt", "group": "text" },
				{ "id": "/docs/c.png", "group": 7 },
				{ "id": "/docs/d" }
			],
			"links": [
				{ "source": "/docs", "target": "/docs/a.txt" },
				{ "source": "/docs", "target": "/docs/b.txt" },
				{ "source": "/docs", "target": "/missing" }
			]
		}))
		.unwrap()
	}

	fn node_info(state: &ForceGraphState) -> HashMap<String, NodeInfo> {
		let mut out = HashMap::new();
		state.graph.visit_nodes(|n| {
			out.insert(n.data.user_data.id.clone(), n.data.user_data.clone());
		});
		out
	}

	fn screen_pos(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let mut pos = (0.0, 0.0);
		state.graph.visit_nodes(|n| {
			if n.data.user_data.id == id {
				pos = state.camera.graph_to_screen(n.x() as f64, n.y() as f64);
			}
		});
		pos
	}

	#[test]
	fn dangling_links_are_skipped() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0);
		assert_eq!(state.node_count(), 5);
		assert_eq!(state.edge_count(), 2);
	}

	#[test]
	fn colors_by_override_then_group_then_default() {
		let info = node_info(&ForceGraphState::new(&sample(), 800.0, 600.0));
		assert_eq!(info["/docs"].color, "rgba(93, 109, 126, 0.8)");
		assert_eq!(info["/docs/a.txt"].color, COLORS[0]);
		assert_eq!(info["/docs/b.txt"].color, COLORS[0]);
		assert_eq!(info["/docs/c.png"].color, COLORS[1]);
		assert_eq!(info["/docs/d"].color, DEFAULT_NODE_COLOR);
		assert_eq!(info["/docs/a.txt"].label, "/docs/a.txt");
		assert_eq!(info["/docs"].label, "docs");
	}

	#[test]
	fn palette_wraps() {
		let mut groups = GroupColors::default();
		for i in 0..COLORS.len() {
			groups.color_for(&i.to_string());
		}
		assert_eq!(groups.color_for("overflow"), COLORS[0]);
		assert_eq!(groups.color_for("1"), COLORS[1]);
	}

	#[test]
	fn click_without_moving_reports_node() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (x, y) = screen_pos(&state, "/docs/c.png");
		state.press(x, y, PressKind::Primary);
		state.pointer_move(x + 1.0, y);
		assert_eq!(state.release().as_deref(), Some("/docs/c.png"));
		assert_eq!(state.gesture, Gesture::Idle);
	}

	#[test]
	fn dragging_pins_node_without_click() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (x, y) = screen_pos(&state, "/docs/d");
		state.press(x, y, PressKind::Primary);
		state.pointer_move(x + 40.0, y + 10.0);
		assert_eq!(state.release(), None);

		let (nx, ny) = screen_pos(&state, "/docs/d");
		assert!((nx - (x + 40.0)).abs() < 1e-3 && (ny - (y + 10.0)).abs() < 1e-3);
		let mut anchored = false;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.id == "/docs/d" {
				anchored = n.data.is_anchor;
			}
		});
		assert!(anchored);
	}

	#[test]
	fn background_press_orbits_and_pan_press_pans() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		state.press(700.0, 300.0, PressKind::Primary);
		assert!(matches!(state.gesture, Gesture::Orbit { .. }));
		state.pointer_move(400.0, 10.0);
		assert!(state.camera.angle.abs() > 0.1);
		state.release();

		let before = (state.camera.x, state.camera.y);
		state.press(10.0, 10.0, PressKind::Pan);
		state.pointer_move(30.0, 5.0);
		assert_eq!((state.camera.x, state.camera.y), (before.0 + 20.0, before.1 - 5.0));
		assert_eq!(state.release(), None);
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (x, y) = screen_pos(&state, "/docs");
		state.pointer_move(x, y);
		assert!(state.hover.node.is_some());
		assert_eq!(state.hover.neighbors.len(), 2);
		state.cancel();
		assert!(state.hover.node.is_none());
		assert!(state.hover.active());
	}

	#[test]
	fn highlight_waits_then_eases_and_fades() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0);
		let (x, y) = screen_pos(&state, "/docs");
		state.pointer_move(x, y);
		let mut hover = state.hover.clone();

		hover.step(0.05);
		assert_eq!(hover.highlight_t, 0.0);
		hover.step(0.05);
		for _ in 0..200 {
			hover.step(0.016);
		}
		assert!(hover.highlight_t > 0.9);

		hover.focus(None, HashSet::new());
		let centre = state.hover.node.unwrap();
		assert!(hover.active() && hover.lit(centre) && hover.centred_on(centre));
		for _ in 0..400 {
			hover.step(0.016);
		}
		assert_eq!(hover.highlight_t, 0.0);
		assert!(!hover.active() && !hover.lit(centre));
	}

	#[test]
	fn particles_loop_along_links() {
		let mut state = ForceGraphState::new(&GraphData::default(), 800.0, 600.0);
		state.flow_time = 1.0 / PARTICLE_SPEED * 2.5;
		assert!((state.particle_progress() - 0.5).abs() < 1e-9);
	}
}
