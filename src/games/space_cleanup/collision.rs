use super::entity::Hitbox;

/// Strict AABB overlap. Boxes that only share an edge do not collide.
pub fn collides(a: &Hitbox, b: &Hitbox) -> bool {
    let ah = a.height();
    let bh = b.height();
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + bh && a.y + ah > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, w: f32, h: Option<f32>) -> Hitbox {
        Hitbox { x, y, w, h }
    }

    #[test]
    fn overlapping_boxes_collide() {
        let a = boxed(100.0, 100.0, 40.0, Some(40.0));
        let b = boxed(120.0, 130.0, 30.0, Some(30.0));
        assert!(collides(&a, &b));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = boxed(100.0, 100.0, 40.0, Some(40.0));
        assert!(!collides(&a, &boxed(140.0, 100.0, 30.0, Some(30.0))));
        assert!(!collides(&a, &boxed(70.0, 100.0, 30.0, Some(30.0))));
        assert!(!collides(&a, &boxed(100.0, 140.0, 30.0, Some(30.0))));
        assert!(!collides(&a, &boxed(100.0, 70.0, 30.0, Some(30.0))));
    }

    #[test]
    fn missing_height_uses_width() {
        let player = boxed(100.0, 100.0, 40.0, Some(40.0));
        // Resource 20 wide starting 19px above the player: overlaps only
        // because its height defaults to 20.
        let resource = boxed(110.0, 81.0, 20.0, None);
        assert!(collides(&player, &resource));
        let resource = boxed(110.0, 80.0, 20.0, None);
        assert!(!collides(&player, &resource));
    }

    fn arb_box() -> impl Strategy<Value = Hitbox> {
        (
            -100.0f32..900.0,
            -100.0f32..500.0,
            1.0f32..60.0,
            prop::option::of(1.0f32..60.0),
        )
            .prop_map(|(x, y, w, h)| Hitbox { x, y, w, h })
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn box_placed_right_of_edge_never_collides(a in arb_box(), b in arb_box()) {
            let b = Hitbox { x: a.x + a.w, ..b };
            prop_assert!(!collides(&a, &b));
        }

        #[test]
        fn box_collides_with_itself(a in arb_box()) {
            prop_assert!(collides(&a, &a));
        }
    }
}
