use serde::{Deserialize, Serialize};

/// Position and size of an entity. `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min_x: self.x,
            min_y: self.y,
            max_x: self.x + self.width,
            max_y: self.y + self.height,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// Shared view of every simulated object.
pub trait Entity {
    fn body(&self) -> &Body;

    fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    /// Whether the entity still takes part in collisions.
    fn is_active(&self) -> bool {
        true
    }

    fn overlaps<E: Entity + ?Sized>(&self, other: &E) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// Movement pattern of a step or enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    Static,
    /// Bounces horizontally between the world edges.
    Moving,
}

/// Lifecycle of a step or enemy. Vanished entities keep their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    Normal,
    Vanished,
}

/// Whether the player is rising or falling, for sprite selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMotion {
    Jump,
    Fall,
}

/// The player avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub vx: f32,
    pub vy: f32,
    pub motion: PlayerMotion,
}

impl Player {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            vx: 0.0,
            vy: 0.0,
            motion: PlayerMotion::Fall,
        }
    }

    /// Landing on a step, an enemy or the ground re-arms the jump.
    pub fn land(&mut self, jump_velocity: f32) {
        self.vy = jump_velocity;
        self.motion = PlayerMotion::Jump;
    }

    /// Jumping into an enemy from below kills all momentum.
    pub fn hit_enemy(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    pub fn is_descending(&self) -> bool {
        self.vy <= 0.0
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// A platform the player bounces on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub body: Body,
    pub kind: MotionKind,
    pub presence: Presence,
    pub vx: f32,
}

impl Step {
    pub fn new(kind: MotionKind, x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            kind,
            presence: Presence::Normal,
            vx: if kind == MotionKind::Moving { speed } else { 0.0 },
        }
    }

    pub fn advance(&mut self, dt: f32, world_width: f32) {
        if self.kind == MotionKind::Moving && self.presence == Presence::Normal {
            patrol(&mut self.body, &mut self.vx, dt, world_width);
        }
    }

    pub fn vanish(&mut self) {
        self.presence = Presence::Vanished;
        self.vx = 0.0;
    }
}

impl Entity for Step {
    fn body(&self) -> &Body {
        &self.body
    }

    fn is_active(&self) -> bool {
        self.presence == Presence::Normal
    }
}

/// A hazard: safe to stomp from above, fatal from below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: MotionKind,
    pub presence: Presence,
    pub vx: f32,
}

impl Enemy {
    pub fn new(kind: MotionKind, x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            kind,
            presence: Presence::Normal,
            vx: if kind == MotionKind::Moving { speed } else { 0.0 },
        }
    }

    pub fn advance(&mut self, dt: f32, world_width: f32) {
        if self.kind == MotionKind::Moving && self.presence == Presence::Normal {
            patrol(&mut self.body, &mut self.vx, dt, world_width);
        }
    }

    pub fn vanish(&mut self) {
        self.presence = Presence::Vanished;
        self.vx = 0.0;
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn is_active(&self) -> bool {
        self.presence == Presence::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarState {
    Available,
    Collected,
}

/// Collectible worth one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub body: Body,
    pub state: StarState,
}

impl Star {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            state: StarState::Available,
        }
    }

    pub fn collect(&mut self) {
        self.state = StarState::Collected;
    }
}

impl Entity for Star {
    fn body(&self) -> &Body {
        &self.body
    }

    fn is_active(&self) -> bool {
        self.state == StarState::Available
    }
}

/// The UFO at the top of the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub body: Body,
}

impl Goal {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
        }
    }
}

impl Entity for Goal {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Ping-pong between `width / 2` and `world_width - width / 2`, reversing
/// and snapping on contact with either bound.
fn patrol(body: &mut Body, vx: &mut f32, dt: f32, world_width: f32) {
    body.x += *vx * dt;
    let min_x = body.width / 2.0;
    let max_x = world_width - body.width / 2.0;
    if body.x < min_x {
        *vx = -*vx;
        body.x = min_x;
    }
    if body.x > max_x {
        *vx = -*vx;
        body.x = max_x;
    }
}

/// What a render consumer needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: ViewKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// False for vanished steps/enemies and collected stars.
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    Player(PlayerMotion),
    Step(MotionKind),
    Enemy(MotionKind),
    Star,
    Goal,
}

impl EntityView {
    pub fn of<E: Entity>(entity: &E, kind: ViewKind) -> Self {
        let body = entity.body();
        Self {
            kind,
            x: body.x,
            y: body.y,
            width: body.width,
            height: body.height,
            active: entity.is_active(),
        }
    }
}
