//! Orbit-style view camera: pan, roll around the view centre and distance zoom,
//! with damped inertia once the pointer lets go.

pub const MIN_DISTANCE: f64 = 10.0;
pub const MAX_DISTANCE: f64 = 1000.0;
/// Distance at which one graph unit spans one pixel.
pub const REFERENCE_DISTANCE: f64 = 200.0;
pub const DAMPING_FACTOR: f64 = 0.15;
const REST_EPSILON: f64 = 1e-4;

#[derive(Clone, Debug)]
pub struct Camera {
	/// Screen position of the graph origin.
	pub x: f64,
	pub y: f64,
	/// Roll in radians.
	pub angle: f64,
	distance: f64,
	center: (f64, f64),
	pan_velocity: (f64, f64),
	spin_velocity: f64,
	held: bool,
}

impl Camera {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			angle: 0.0,
			distance: REFERENCE_DISTANCE,
			center: (width / 2.0, height / 2.0),
			pan_velocity: (0.0, 0.0),
			spin_velocity: 0.0,
			held: false,
		}
	}

	/// Pixels per graph unit.
	pub fn scale(&self) -> f64 {
		REFERENCE_DISTANCE / self.distance
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		let (sin, cos, k) = (self.angle.sin(), self.angle.cos(), self.scale());
		(
			self.x + (gx * cos - gy * sin) * k,
			self.y + (gx * sin + gy * cos) * k,
		)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (sin, cos, k) = (self.angle.sin(), self.angle.cos(), self.scale());
		let (dx, dy) = ((sx - self.x) / k, (sy - self.y) / k);
		(dx * cos + dy * sin, -dx * sin + dy * cos)
	}

	/// Move closer by `factor` (> 1 zooms in) keeping the point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.distance = (self.distance / factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
		let (nx, ny) = self.graph_to_screen(gx, gy);
		self.x += sx - nx;
		self.y += sy - ny;
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
		self.pan_velocity = (dx, dy);
	}

	/// Roll the view by `delta` radians around the view centre.
	pub fn rotate_by(&mut self, delta: f64) {
		let (sin, cos) = (delta.sin(), delta.cos());
		let (ox, oy) = (self.x - self.center.0, self.y - self.center.1);
		self.x = self.center.0 + ox * cos - oy * sin;
		self.y = self.center.1 + ox * sin + oy * cos;
		self.angle += delta;
		self.spin_velocity = delta;
	}

	/// Angle of a screen point around the view centre.
	pub fn bearing(&self, sx: f64, sy: f64) -> f64 {
		(sy - self.center.1).atan2(sx - self.center.0)
	}

	/// A gesture grabbed the view; inertia stops.
	pub fn hold(&mut self) {
		self.held = true;
		self.pan_velocity = (0.0, 0.0);
		self.spin_velocity = 0.0;
	}

	pub fn release(&mut self) {
		self.held = false;
	}

	/// Advance inertia by one frame.
	pub fn step(&mut self) {
		if self.held {
			return;
		}
		let keep = 1.0 - DAMPING_FACTOR;
		let (vx, vy) = self.pan_velocity;
		if vx.abs() > REST_EPSILON || vy.abs() > REST_EPSILON {
			self.x += vx;
			self.y += vy;
			self.pan_velocity = (vx * keep, vy * keep);
		} else {
			self.pan_velocity = (0.0, 0.0);
		}
		let spin = self.spin_velocity;
		if spin.abs() > REST_EPSILON {
			self.rotate_by(spin);
			self.spin_velocity = spin * keep;
		} else {
			self.spin_velocity = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		let (cx, cy) = (width / 2.0, height / 2.0);
		self.x += cx - self.center.0;
		self.y += cy - self.center.1;
		self.center = (cx, cy);
	}
}
