//! Collision resolution
//!
//! Each contact is classified by the roles of its two entities and looked up in
//! a fixed rule table. Rules only ever act on the pair from the reported
//! entity's side; the mirrored contact gets its own lookup.

use rock_engine::prelude::*;

use crate::components::{
    Collidable, Enemy, Health, Invulnerable, Obstacle, PendingDestroy, Player, Projectile, Velocity,
};
use crate::context::SimContext;
use crate::systems::collision::Contact;
use crate::ui;

/// What an entity is to the combat rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatRole {
    /// Fired shot
    Projectile,
    /// Hostile
    Enemy,
    /// The ship
    Player,
    /// Wall
    Obstacle,
    /// Anything the rules ignore
    Other,
}

impl CombatRole {
    /// Classify an entity
    ///
    /// Non-collidable entities are always [`CombatRole::Other`]. When an entity
    /// carries several role tags the first of projectile, enemy, player and
    /// obstacle wins.
    pub fn of(world: &World, entity: Entity) -> Self {
        if !world.has::<Collidable>(entity) {
            Self::Other
        } else if world.has::<Projectile>(entity) {
            Self::Projectile
        } else if world.has::<Enemy>(entity) {
            Self::Enemy
        } else if world.has::<Player>(entity) {
            Self::Player
        } else if world.has::<Obstacle>(entity) {
            Self::Obstacle
        } else {
            Self::Other
        }
    }
}

/// Effect applied for a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatRule {
    /// Projectile hit a wall and is removed
    DestroyProjectile,
    /// Enemy velocity is reflected off a wall
    BounceOffWall,
    /// Enemy costs the player a hit point unless invulnerable
    DamagePlayer,
    /// Projectile costs the enemy a hit point and is removed
    DamageEnemy,
}

/// Rule for a contact seen from `role`'s side
pub fn rule_for(role: CombatRole, other: CombatRole) -> Option<CombatRule> {
    use CombatRole as R;

    match (role, other) {
        (R::Projectile, R::Obstacle) => Some(CombatRule::DestroyProjectile),
        (R::Enemy, R::Obstacle) => Some(CombatRule::BounceOffWall),
        (R::Enemy, R::Player) => Some(CombatRule::DamagePlayer),
        (R::Enemy, R::Projectile) => Some(CombatRule::DamageEnemy),
        _ => None,
    }
}

/// Reflect `velocity` off the wall box `wall` as seen from `center`
///
/// The normal runs from the wall's closest point to `center`, flattened to the
/// horizontal plane. A center inside the wall has no usable normal and leaves
/// the velocity unchanged.
pub fn reflect_off(velocity: Vec3, center: Vec3, wall: &Obb) -> Vec3 {
    let away = center - wall.closest_point(center);
    let Some(normal) = Vec3::new(away.x, 0.0, away.z).try_normalize(f32::EPSILON) else {
        return velocity;
    };
    velocity - 2.0 * velocity.dot(&normal) * normal
}

/// Apply the rule for one contact, returning the rule that fired
pub fn resolve(world: &mut World, ctx: &SimContext, contact: &Contact) -> Option<CombatRule> {
    let rule = rule_for(CombatRole::of(world, contact.entity), CombatRole::of(world, contact.other))?;

    match rule {
        CombatRule::DestroyProjectile => {
            world.attach(contact.entity, PendingDestroy);
        }
        CombatRule::BounceOffWall => {
            if let Some(velocity) = world.get_mut::<Velocity>(contact.entity) {
                velocity.0 = reflect_off(velocity.0, contact.bounds.center, &contact.other_bounds);
            }
        }
        CombatRule::DamagePlayer => {
            if world.has::<Invulnerable>(contact.other) {
                return Some(rule);
            }
            if let Some(health) = world.get_mut::<Health>(contact.other) {
                health.0 -= 1;
                let lives = health.0;
                ui::set_lives(world, lives);
                log::info!("Player hit! Current HP: {lives}");
            }
            world.attach(contact.other, Invulnerable(ctx.config.player.invulnerable_period));
        }
        CombatRule::DamageEnemy => {
            if let Some(health) = world.get_mut::<Health>(contact.entity) {
                health.0 -= 1;
            }
            world.attach(contact.other, PendingDestroy);
        }
    }

    Some(rule)
}
