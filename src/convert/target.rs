//! FancyNPCs record types.

use std::fmt;

use crate::document::{Mapping, Value};

/// Creator written when the source NPC has no owner.
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Skin identifier used when no texture can be resolved.
pub const DEFAULT_SKIN: &str = "steve";

/// Entity type used when the source does not name one.
pub const DEFAULT_ENTITY_TYPE: &str = "PLAYER";

/// FancyNPCs' "no limit" visibility distance.
pub const UNLIMITED_VISIBILITY: i32 = i32::MAX;

/// Player model variant of a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkinVariant {
    #[default]
    Classic,
    Slim,
}

impl SkinVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinVariant::Classic => "CLASSIC",
            SkinVariant::Slim => "SLIM",
        }
    }
}

impl fmt::Display for SkinVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Skin descriptor: a skin name or texture URL plus its model.
#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    pub identifier: String,
    pub variant: SkinVariant,
    pub mirror_skin: bool,
}

impl Default for Skin {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_SKIN.to_string(),
            variant: SkinVariant::Classic,
            mirror_skin: false,
        }
    }
}

/// World position and facing.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
}

/// Free-form entity attributes. FancyNPCs stores them as strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub shaking: String,
    pub pose: String,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            shaking: "false".to_string(),
            pose: "standing".to_string(),
        }
    }
}

/// A single NPC in FancyNPCs format.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetNpc {
    pub name: String,
    pub creator: String,
    pub display_name: String,
    pub entity_type: String,
    pub location: Location,
    pub show_in_tab: bool,
    pub spawn_entity: bool,
    pub collidable: bool,
    pub glowing: bool,
    pub glowing_color: String,
    pub turn_to_player: bool,
    pub turn_to_player_distance: f64,
    pub interaction_cooldown: f64,
    pub scale: f64,
    pub visibility_distance: i32,
    pub skin: Skin,
    pub attributes: Attributes,
}

impl TargetNpc {
    /// Create a record with FancyNPCs' defaults for everything not given.
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            creator: NIL_UUID.to_string(),
            display_name: String::new(),
            entity_type: DEFAULT_ENTITY_TYPE.to_string(),
            location,
            show_in_tab: false,
            spawn_entity: true,
            collidable: false,
            glowing: false,
            glowing_color: "dark_aqua".to_string(),
            turn_to_player: false,
            turn_to_player_distance: -1.0,
            interaction_cooldown: 0.0,
            scale: 1.0,
            visibility_distance: UNLIMITED_VISIBILITY,
            skin: Skin::default(),
            attributes: Attributes::default(),
        }
    }

    /// Build the document form, with keys in the order FancyNPCs writes them.
    pub fn to_mapping(&self) -> Mapping {
        let location: Mapping = [
            ("world", Value::from(self.location.world.as_str())),
            ("x", Value::from(self.location.x)),
            ("y", Value::from(self.location.y)),
            ("z", Value::from(self.location.z)),
            ("yaw", Value::from(self.location.yaw)),
            ("pitch", Value::from(self.location.pitch)),
        ]
        .into_iter()
        .collect();

        let skin: Mapping = [
            ("identifier", Value::from(self.skin.identifier.as_str())),
            ("variant", Value::from(self.skin.variant.as_str())),
            ("mirrorSkin", Value::from(self.skin.mirror_skin)),
        ]
        .into_iter()
        .collect();

        let attributes: Mapping = [
            ("shaking", self.attributes.shaking.as_str()),
            ("pose", self.attributes.pose.as_str()),
        ]
        .into_iter()
        .collect();

        [
            ("name", Value::from(self.name.as_str())),
            ("creator", Value::from(self.creator.as_str())),
            ("displayName", Value::from(self.display_name.as_str())),
            ("type", Value::from(self.entity_type.as_str())),
            ("location", Value::from(location)),
            ("showInTab", Value::from(self.show_in_tab)),
            ("spawnEntity", Value::from(self.spawn_entity)),
            ("collidable", Value::from(self.collidable)),
            ("glowing", Value::from(self.glowing)),
            ("glowingColor", Value::from(self.glowing_color.as_str())),
            ("turnToPlayer", Value::from(self.turn_to_player)),
            ("turnToPlayerDistance", Value::from(self.turn_to_player_distance)),
            ("interactionCooldown", Value::from(self.interaction_cooldown)),
            ("scale", Value::from(self.scale)),
            ("visibility_distance", Value::from(self.visibility_distance)),
            ("skin", Value::from(skin)),
            ("attributes", Value::from(attributes)),
        ]
        .into_iter()
        .collect()
    }
}
