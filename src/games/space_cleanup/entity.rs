/// Axis-aligned box in play-field pixels. `h` is `None` for round entities,
/// whose hitbox is a square of side `w`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: Option<f32>,
}

impl Hitbox {
    pub fn height(&self) -> f32 {
        self.h.unwrap_or(self.w)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            x: self.x,
            y: self.y,
            w: self.size,
            h: Some(self.size),
        }
    }

    /// Applies one frame of movement and keeps the player inside the field.
    pub fn step(&mut self, input: MoveInput, speed: f32, field_w: f32, field_h: f32) {
        if input.left {
            self.x -= speed;
        }
        if input.right {
            self.x += speed;
        }
        if input.up {
            self.y -= speed;
        }
        if input.down {
            self.y += speed;
        }
        self.x = self.x.clamp(0.0, (field_w - self.size).max(0.0));
        self.y = self.y.clamp(0.0, (field_h - self.size).max(0.0));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debris {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Debris {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            x: self.x,
            y: self.y,
            w: self.size,
            h: Some(self.size),
        }
    }

    pub fn is_off_field(&self) -> bool {
        self.x < -self.size
    }
}

/// A round pickup. Only the diameter is stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resource {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
}

impl Resource {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            x: self.x,
            y: self.y,
            w: self.diameter,
            h: None,
        }
    }

    pub fn is_off_field(&self) -> bool {
        self.x < -self.diameter
    }
}

/// Directions held during a frame. Opposite directions cancel out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}
