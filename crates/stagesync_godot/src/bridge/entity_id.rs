//! Entity ↔ GDScript int
//!
//! GDScript видит entity как `int` (i64). Обе стороны проверяются:
//! произвольное число из GDScript не должно паниковать в `Entity::from_bits`.

use bevy::prelude::Entity;

/// Entity id for GDScript. `None` if the bits do not fit a non-negative i64.
pub fn entity_to_id(entity: Entity) -> Option<i64> {
    i64::try_from(entity.to_bits()).ok()
}

/// Decode an id received from GDScript; `None` for ids no Entity can have.
pub fn entity_from_id(entity_id: i64) -> Option<Entity> {
    let bits = u64::try_from(entity_id).ok()?;
    Entity::try_from_bits(bits).ok()
}
