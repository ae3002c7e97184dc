//! Collision, combat, death and the sweep working together

use rock_engine::prelude::*;

use super::Harness;
use crate::components::{
    Enemy, GameManagerTag, GameOverTag, Health, Invulnerable, Obstacle, PendingDestroy, Projectile, Shatters,
    Velocity,
};
use crate::context::GameState;
use crate::systems::combat::{self, CombatRule};
use crate::systems::lifecycle::Outcome;
use crate::systems::Contact;
use crate::ui;

fn enemy(harness: &mut Harness, position: Vec3, hp: i32) -> Entity {
    let enemy = harness.body(position);
    harness.world.attach(enemy, Enemy);
    harness.world.attach(enemy, Health(hp));
    harness.world.attach(enemy, Velocity(Vec3::zeros()));
    enemy
}

fn projectile(harness: &mut Harness, position: Vec3) -> Entity {
    let bullet = harness.body(position);
    harness.world.attach(bullet, Projectile);
    harness.world.attach(bullet, Velocity(Vec3::zeros()));
    bullet
}

#[test]
fn test_projectile_kills_enemy_in_one_tick() {
    let mut harness = Harness::new();
    harness.player(Vec3::new(-20.0, 0.0, 0.0));
    enemy(&mut harness, Vec3::new(20.0, 0.0, 10.0), 3);
    let target = enemy(&mut harness, Vec3::new(5.0, 0.0, 5.0), 1);
    let bullet = projectile(&mut harness, Vec3::new(5.2, 0.0, 5.0));

    harness.step();

    assert!(harness.world.has::<PendingDestroy>(target));
    assert!(harness.world.has::<PendingDestroy>(bullet));
    assert_eq!(ui::read(&harness.world).unwrap().current_score, 100);

    assert_eq!(harness.sweep(), 2);
    let remaining: Vec<Entity> = harness.world.query(&Query::new().with::<Enemy>()).collect();
    assert!(!remaining.contains(&target));
    assert_eq!(harness.world.count(&Query::new().with::<Projectile>()), 0);
    assert!(!harness.world.is_alive(target) && !harness.world.is_alive(bullet));
    assert_eq!(harness.ctx.state, GameState::Gameplay);
}

#[test]
fn test_last_hit_point_ends_round_same_tick() {
    let mut harness = Harness::new();
    let player = harness.player(Vec3::zeros());
    harness.world.attach(player, Health(1));
    enemy(&mut harness, Vec3::new(0.3, 0.0, 0.0), 2);

    harness.step();

    assert_eq!(harness.world.get::<Health>(player), Some(&Health(0)));
    assert_eq!(harness.ctx.state, GameState::GameOver);
    let manager = harness.world.single(&Query::new().with::<GameManagerTag>()).unwrap();
    assert!(harness.world.has::<GameOverTag>(manager));
    assert_eq!(ui::read(&harness.world).unwrap().lives, 0);
}

#[test]
fn test_invulnerable_player_takes_no_damage() {
    let mut harness = Harness::new();
    let player = harness.player(Vec3::zeros());
    harness.world.attach(player, Invulnerable(1.0));
    enemy(&mut harness, Vec3::new(0.3, 0.0, 0.0), 2);

    harness.step();

    assert_eq!(
        harness.world.get::<Health>(player),
        Some(&Health(harness.ctx.config.player.hitpoints))
    );
}

#[test]
fn test_shattered_enemy_keeps_round_going() {
    let mut harness = Harness::new();
    harness.player(Vec3::new(-20.0, 0.0, 0.0));
    let target = enemy(&mut harness, Vec3::new(5.0, 0.0, 5.0), 1);
    harness.world.attach(target, Shatters(2));
    projectile(&mut harness, Vec3::new(5.0, 0.0, 5.3));

    harness.step();
    harness.sweep();

    let shards: Vec<Entity> = harness.world.query(&Query::new().with::<Enemy>()).collect();
    assert_eq!(shards.len(), harness.ctx.config.shatter_amount as usize);
    for shard in &shards {
        assert_eq!(harness.world.get::<Shatters>(*shard), Some(&Shatters(1)));
    }
    assert_eq!(harness.ctx.state, GameState::Gameplay);
}

#[test]
fn test_last_enemy_pending_wins_next_tick() {
    let mut harness = Harness::new();
    harness.player(Vec3::new(-20.0, 0.0, 0.0));
    enemy(&mut harness, Vec3::new(5.0, 0.0, 5.0), 1);
    projectile(&mut harness, Vec3::new(5.0, 0.0, 5.0));

    harness.step();
    assert_eq!(harness.ctx.state, GameState::Gameplay);
    harness.sweep();

    harness.step();
    assert_eq!(harness.ctx.state, GameState::GameOver);
    assert_eq!(
        crate::systems::lifecycle::check_outcome(&mut harness.world, &mut harness.ctx).unwrap(),
        Some(Outcome::Victory)
    );
}

#[test]
fn test_sweep_twice_is_noop() {
    let mut harness = Harness::new();
    harness.player(Vec3::new(-20.0, 0.0, 0.0));
    enemy(&mut harness, Vec3::new(20.0, 0.0, 10.0), 3);
    let bullet = projectile(&mut harness, Vec3::zeros());
    harness.world.attach(bullet, PendingDestroy);

    assert_eq!(harness.sweep(), 1);
    let alive = harness.world.entity_count();
    assert_eq!(harness.sweep(), 0);
    assert_eq!(harness.world.entity_count(), alive);
}

#[test]
fn test_detection_symmetric_resolution_not() {
    let mut harness = Harness::new();
    let wall = harness.body(Vec3::zeros());
    harness.world.attach(wall, Obstacle);
    let target = enemy(&mut harness, Vec3::new(0.8, 0.0, 0.0), 2);
    harness.world.attach(target, Velocity(Vec3::new(-1.0, 0.0, 0.0)));

    let contacts: Vec<Contact> = harness.collisions.detect(&harness.world).to_vec();
    assert_eq!(contacts.len(), 2);
    assert_eq!(
        contacts[0].bounds.intersects(&contacts[0].other_bounds),
        contacts[0].other_bounds.intersects(&contacts[0].bounds)
    );

    let fired: Vec<Option<CombatRule>> = contacts
        .iter()
        .map(|contact| combat::resolve(&mut harness.world, &harness.ctx, contact))
        .collect();
    assert!(fired.contains(&Some(CombatRule::BounceOffWall)));
    assert!(fired.contains(&None));

    let Velocity(velocity) = *harness.world.get::<Velocity>(target).unwrap();
    assert!(velocity.x > 0.0);
}
