use space_invaders::bullet::{Bullet, BulletOwner};
use space_invaders::constants::{ALIEN_BULLET_CAPACITY, FORMATION_ROWS};
use space_invaders::entities::Entity;
use space_invaders::formation::Formation;
use space_invaders::geometry::Point;
use space_invaders::host::{AssetCache, ImageHandle};

fn make_formation() -> Formation {
    Formation::new(&mut AssetCache::new())
}

fn descend(formation: &mut Formation) {
    formation.pre_update();
    formation.request_descent();
    formation.post_update();
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[test]
fn initial_layout() {
    let f = make_formation();
    for row in 0..FORMATION_ROWS {
        assert_eq!(f.row_y(row), 110 + 60 * row as i32);
    }
    assert_eq!(f.direction(), 1);
    assert_eq!(f.raw_speed(), 8);
    assert_eq!(f.speed(), 2);
    assert_eq!(f.width(), 48);
    assert_eq!(f.bullets().live_count(), 0);
}

// ── Descent ───────────────────────────────────────────────────────────────────

#[test]
fn descent_drops_rows_and_reverses() {
    let mut f = make_formation();
    descend(&mut f);
    for row in 0..FORMATION_ROWS {
        assert_eq!(f.row_y(row), 134 + 60 * row as i32);
    }
    assert_eq!(f.direction(), -1);
    assert_eq!(f.raw_speed(), 9);
    assert!(!f.needs_descent());

    descend(&mut f);
    assert_eq!(f.direction(), 1);
    assert_eq!(f.row_y(0), 158);
}

#[test]
fn visible_speed_is_quarter_of_counter() {
    let mut f = make_formation();
    for n in 1..=12 {
        descend(&mut f);
        assert_eq!(f.speed(), (8 + n) / 4, "after {n} descents");
    }
}

#[test]
fn no_descent_without_request() {
    let mut f = make_formation();
    f.pre_update();
    f.register_alive();
    assert!(!f.post_update());
    assert_eq!(f.row_y(0), 110);
    assert_eq!(f.raw_speed(), 8);
}

#[test]
fn empty_tick_reports_cleared_wave() {
    let mut f = make_formation();
    f.pre_update();
    assert!(f.post_update());

    f.pre_update();
    f.register_alive();
    f.register_alive();
    assert_eq!(f.alive_count(), 2);
    assert!(!f.post_update());
}

// ── Reset and new waves ───────────────────────────────────────────────────────

#[test]
fn reset_restores_base_speed_and_regroups() {
    let mut f = make_formation();
    descend(&mut f);
    descend(&mut f);
    descend(&mut f);
    f.fire(0, Point::new(100, 100));

    f.reset();
    assert_eq!(f.raw_speed(), 8);
    for row in 0..FORMATION_ROWS {
        assert_eq!(f.row_y(row), 100 + 60 * row as i32);
    }
    assert_eq!(f.bullets().live_count(), 0);
    // Direction carries over
    assert_eq!(f.direction(), -1);
}

#[test]
fn advance_wave_keeps_accumulated_speed() {
    let mut f = make_formation();
    descend(&mut f);
    descend(&mut f);
    f.advance_wave();
    assert_eq!(f.raw_speed(), 11);
    assert_eq!(f.row_y(0), 100);
    assert_eq!(f.row_y(4), 340);
}

// ── Alien bullets ─────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_below_alien_until_pool_full() {
    let mut f = make_formation();
    for i in 0..ALIEN_BULLET_CAPACITY {
        assert!(f.fire(i, Point::new(50 * i as i32, 200)));
    }
    assert!(!f.fire(99, Point::new(400, 200)));
    assert_eq!(f.bullets().live_count(), ALIEN_BULLET_CAPACITY);

    let first = f.bullets().slot(0).map(|b| (b.pos(), b.owner()));
    assert_eq!(first, Some((Point::new(0, 224), BulletOwner::Alien(0))));
}

#[test]
fn bullets_fall_and_free_their_slot() {
    let mut f = make_formation();
    f.fire(3, Point::new(100, 200));
    f.fire(4, Point::new(300, 200));

    f.update(|bullet| {
        if bullet.pos().x == 100 {
            bullet.kill();
        }
    });
    assert!(f.bullets().slot(0).is_none());
    assert_eq!(f.bullets().slot(1).map(|b| b.pos().y), Some(232));
}

#[test]
fn player_bullet_cancels_alien_bullet() {
    let mut f = make_formation();
    f.fire(0, Point::new(100, 200));

    let mut miss = Bullet::player(Point::new(300, 224), ImageHandle(0));
    f.check_hit(&mut miss);
    assert!(!miss.is_dead());
    assert_eq!(f.bullets().live_count(), 1);

    let mut hit = Bullet::player(Point::new(100, 224), ImageHandle(0));
    f.check_hit(&mut hit);
    assert!(hit.is_dead());
    assert_eq!(f.bullets().live_count(), 0);
}
