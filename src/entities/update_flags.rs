use crate::world::position::Position;

/// Elevation used for a graphic that does not name one.
pub const DEFAULT_GRAPHIC_HEIGHT: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub id: u16,
    pub delay: u16,
}

impl From<u16> for Animation {
    fn from(id: u16) -> Self {
        Animation { id, delay: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Graphic {
    pub id: u16,
    pub delay: u16,
    pub height: u16,
}

impl From<u16> for Graphic {
    fn from(id: u16) -> Self {
        Graphic {
            id,
            delay: 0,
            height: DEFAULT_GRAPHIC_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub color: u8,
    pub effects: u8,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitType {
    Miss,
    Damage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitSplat {
    pub damage: u16,
    pub kind: HitType,
}

/// Observable changes made to one mob during the current tick.
///
/// Every setter overwrites the previous value; the synchronization pass
/// drains the whole record once per tick with [`UpdateFlags::take`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateFlags {
    pub face_position: Option<Position>,
    pub animation: Option<Animation>,
    pub graphics: Option<Graphic>,
    pub appearance_changed: bool,
    pub chat: Option<ChatMessage>,
    pub hit: Option<HitSplat>,
}

impl UpdateFlags {
    pub fn set_face_position(&mut self, position: Position) {
        self.face_position = Some(position);
    }

    pub fn set_animation(&mut self, animation: impl Into<Animation>) {
        self.animation = Some(animation.into());
    }

    pub fn set_graphics(&mut self, graphics: impl Into<Graphic>) {
        self.graphics = Some(graphics.into());
    }

    pub fn set_appearance_changed(&mut self) {
        self.appearance_changed = true;
    }

    pub fn set_chat(&mut self, message: ChatMessage) {
        self.chat = Some(message);
    }

    pub fn set_hit(&mut self, hit: HitSplat) {
        self.hit = Some(hit);
    }

    pub fn is_update_required(&self) -> bool {
        self.face_position.is_some()
            || self.animation.is_some()
            || self.graphics.is_some()
            || self.appearance_changed
            || self.chat.is_some()
            || self.hit.is_some()
    }

    /// Returns everything recorded so far and leaves the flags empty.
    pub fn take(&mut self) -> UpdateFlags {
        std::mem::take(self)
    }

    pub fn reset(&mut self) {
        *self = UpdateFlags::default();
    }
}
