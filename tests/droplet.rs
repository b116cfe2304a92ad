mod tests {
    use myrtio_droplets::color::BLACK;
    use myrtio_droplets::{Droplet, DropletState, Rgb};

    const YELLOW: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 0,
    };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const GRAY: Rgb = Rgb {
        r: 128,
        g: 128,
        b: 128,
    };

    const LED_COUNT: usize = 10;
    const MAX_POS: u8 = 9;
    const FLOOR: u16 = 9 << 8;

    /// Step until the droplet is inactive again, collecting every state change
    fn lifecycle(mut droplet: Droplet, max_pos: u8) -> Vec<DropletState> {
        let mut states = vec![droplet.state()];
        for _ in 0..100_000 {
            droplet.step(max_pos);
            let state = droplet.state();
            if states.last() != Some(&state) {
                states.push(state);
            }
            if state == DropletState::Inactive {
                break;
            }
        }
        states
    }

    #[test]
    fn test_new_droplet_is_swelling() {
        let droplet = Droplet::new(YELLOW, 5);
        assert_eq!(droplet.state(), DropletState::Swelling);
        assert!(droplet.is_active());
        assert_eq!(droplet.position(), 0);
        assert_eq!(droplet.speed(), 0);
        assert_eq!(droplet.color(), YELLOW);
        assert_eq!(droplet.gravity(), 5);
    }

    #[test]
    fn test_inactive_droplet_is_a_no_op() {
        let mut droplet = Droplet::default();
        assert_eq!(droplet.state(), DropletState::Inactive);
        assert!(!droplet.is_active());

        let mut leds = [BLACK; LED_COUNT];
        for _ in 0..10 {
            droplet.render(&mut leds, false);
            droplet.render(&mut leds, true);
        }
        assert_eq!(droplet.state(), DropletState::Inactive);
        assert_eq!(leds, [BLACK; LED_COUNT]);
    }

    #[test]
    fn test_swell_duration_follows_blue_channel() {
        let mut droplet = Droplet::new(Rgb::new(0, 0, 50), 5);
        for _ in 0..39 {
            droplet.step(MAX_POS);
        }
        assert_eq!(droplet.state(), DropletState::Swelling);
        assert_eq!(droplet.position(), 39);

        droplet.step(MAX_POS);
        assert_eq!(droplet.state(), DropletState::Falling);
        assert_eq!(droplet.position(), 0);
        assert_eq!(droplet.speed(), 0);
    }

    #[test]
    fn test_droplet_without_blue_falls_immediately() {
        let mut droplet = Droplet::new(YELLOW, 5);
        droplet.step(MAX_POS);
        assert_eq!(droplet.state(), DropletState::Falling);

        let mut droplet = Droplet::new(Rgb::new(255, 255, 10), 5);
        droplet.step(MAX_POS);
        assert_eq!(droplet.state(), DropletState::Falling);
    }

    #[test]
    fn test_swelling_brightness_ramps_at_emission_end() {
        let mut droplet = Droplet::new(Rgb::new(0, 0, 200), 5);
        for _ in 0..128 {
            droplet.step(MAX_POS);
        }
        assert_eq!(droplet.state(), DropletState::Swelling);

        let mut leds = [BLACK; LED_COUNT];
        droplet.draw(&mut leds, MAX_POS, false);
        assert_eq!(leds[0], Rgb::new(0, 0, 100));
        assert!(leds[1..].iter().all(|led| *led == BLACK));

        let mut leds = [BLACK; LED_COUNT];
        droplet.draw(&mut leds, MAX_POS, true);
        assert_eq!(leds[LED_COUNT - 1], Rgb::new(0, 0, 100));
        assert!(leds[..LED_COUNT - 1].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_falling_accelerates_with_gravity() {
        let mut droplet = Droplet::new(YELLOW, 5);
        droplet.step(MAX_POS);

        let mut trace = Vec::new();
        for _ in 0..5 {
            droplet.step(MAX_POS);
            trace.push((droplet.position(), droplet.speed()));
        }
        assert_eq!(trace, [(0, 5), (5, 10), (15, 15), (30, 20), (50, 25)]);
    }

    #[test]
    fn test_first_impact_bounces() {
        let mut droplet = Droplet::new(YELLOW, 5);
        droplet.step(MAX_POS);

        let mut before = droplet;
        while droplet.state() == DropletState::Falling {
            before = droplet;
            droplet.step(MAX_POS);
        }

        assert_eq!(droplet.state(), DropletState::Bouncing);
        assert!(droplet.speed() < 0);
        assert_eq!(droplet.speed(), -(before.speed() + 5) / 4);
        assert_eq!(droplet.color().b, 0);
        assert_eq!(droplet.color(), Rgb::new(39, 39, 0));

        let overshoot =
            i32::from(before.position()) + i32::from(before.speed()) - i32::from(FLOOR);
        assert!(overshoot > 0);
        assert_eq!(i32::from(droplet.position()), i32::from(FLOOR) - overshoot);

        // 30 ticks of free fall put the droplet at 2175 moving at 150
        assert_eq!(before.position(), 2175);
        assert_eq!(droplet.position(), 2283);
        assert_eq!(droplet.speed(), -38);
    }

    #[test]
    fn test_bouncing_leaves_residue_on_floor() {
        let mut droplet = Droplet::new(YELLOW, 5);
        while droplet.state() != DropletState::Bouncing {
            droplet.step(MAX_POS);
        }
        assert_eq!(droplet.position(), 2283);

        let mut leds = [BLACK; LED_COUNT];
        droplet.draw(&mut leds, MAX_POS, false);
        assert_eq!(leds[8], Rgb::new(3, 3, 0));
        assert_eq!(leds[9], Rgb::new(74, 74, 0));
        assert!(leds[..8].iter().all(|led| *led == BLACK));

        let mut leds = [BLACK; LED_COUNT];
        droplet.draw(&mut leds, MAX_POS, true);
        assert_eq!(leds[1], Rgb::new(3, 3, 0));
        assert_eq!(leds[0], Rgb::new(74, 74, 0));
        assert!(leds[2..].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_collision_scaling_keeps_full_color() {
        let mut droplet = Droplet::new(YELLOW, 5).with_collision_scaling(256);
        while droplet.state() != DropletState::Bouncing {
            droplet.step(MAX_POS);
        }
        assert_eq!(droplet.color(), YELLOW);
    }

    #[test]
    fn test_lifecycle_order() {
        for color in [YELLOW, BLUE, GRAY] {
            assert_eq!(
                lifecycle(Droplet::new(color, 5), MAX_POS),
                [
                    DropletState::Swelling,
                    DropletState::Falling,
                    DropletState::Bouncing,
                    DropletState::Inactive,
                ]
            );
        }
    }

    #[test]
    fn test_position_stays_on_strip() {
        for count in 1u8..=60 {
            let max_pos = count - 1;
            let floor = u16::from(max_pos) << 8;
            for color in [YELLOW, BLUE, GRAY] {
                for gravity in [1, 5, 20] {
                    let mut droplet = Droplet::new(color, gravity);
                    let mut ticks = 0;
                    while droplet.is_active() {
                        droplet.step(max_pos);
                        if matches!(
                            droplet.state(),
                            DropletState::Falling | DropletState::Bouncing
                        ) {
                            assert!(
                                droplet.position() <= floor,
                                "position {} beyond floor {} (count {count}, gravity {gravity})",
                                droplet.position(),
                                floor
                            );
                        }
                        ticks += 1;
                        assert!(ticks < 100_000, "droplet never settled");
                    }
                }
            }
        }
    }

    #[test]
    fn test_sub_pixel_weights_sum_to_full_color() {
        let color = Rgb::new(200, 100, 0);
        let mut droplet = Droplet::new(color, 5);
        droplet.step(19);

        let mut checked = 0;
        while droplet.state() == DropletState::Falling {
            let [index, fraction] = droplet.position().to_be_bytes();
            let index = usize::from(index);
            let mut leds = [BLACK; 20];
            droplet.draw(&mut leds, 19, false);

            if fraction == 0 {
                assert_eq!(leds[index], color);
            } else {
                let r = u16::from(leds[index].r) + u16::from(leds[index + 1].r);
                let g = u16::from(leds[index].g) + u16::from(leds[index + 1].g);
                assert!((199..=200).contains(&r), "red sum {r}");
                assert!((99..=100).contains(&g), "green sum {g}");
                checked += 1;
            }
            for (i, led) in leds.iter().enumerate() {
                if i != index && i != index + 1 {
                    assert_eq!(*led, BLACK);
                }
            }

            droplet.step(19);
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_reverse_rendering_mirrors() {
        const COUNT: usize = 12;
        for color in [YELLOW, BLUE, GRAY] {
            let mut droplet = Droplet::new(color, 5);
            while droplet.is_active() {
                let mut forward = [BLACK; COUNT];
                let mut reversed = [BLACK; COUNT];
                droplet.draw(&mut forward, 11, false);
                droplet.draw(&mut reversed, 11, true);

                for i in 0..COUNT {
                    assert_eq!(forward[i], reversed[COUNT - 1 - i]);
                }
                droplet.step(11);
            }
        }
    }

    #[test]
    fn test_compositing_is_commutative_and_saturating() {
        let base = [Rgb::new(250, 20, 250); LED_COUNT];

        let green = Rgb::new(0, 200, 0);
        let pairs = [(YELLOW, green, 0), (YELLOW, BLUE, 7), (GRAY, YELLOW, 25)];
        for (first, second, delay) in pairs {
            let mut a = Droplet::new(first, 5);
            let mut b = Droplet::new(second, 5);
            for _ in 0..delay {
                b.step(MAX_POS);
            }

            let mut both_bouncing = false;
            while a.is_active() || b.is_active() {
                for reverse in [false, true] {
                    let mut ab = base;
                    a.draw(&mut ab, MAX_POS, reverse);
                    b.draw(&mut ab, MAX_POS, reverse);

                    let mut ba = base;
                    b.draw(&mut ba, MAX_POS, reverse);
                    a.draw(&mut ba, MAX_POS, reverse);

                    assert_eq!(ab, ba);
                    for (led, under) in ab.iter().zip(base.iter()) {
                        assert!(led.r >= under.r && led.g >= under.g && led.b >= under.b);
                    }
                }

                both_bouncing |= a.state() == DropletState::Bouncing
                    && b.state() == DropletState::Bouncing;
                a.step(MAX_POS);
                b.step(MAX_POS);
            }
            if delay == 0 {
                // Same start, both residues overlap on the floor LED
                assert!(both_bouncing);
            }
        }

        // Yellow sits exactly on LED 0 and is added in full
        let mut a = Droplet::new(YELLOW, 5);
        a.step(MAX_POS);
        let mut leds = base;
        a.draw(&mut leds, MAX_POS, false);
        assert_eq!(leds[0], Rgb::new(255, 255, 250));
    }

    #[test]
    fn test_render_on_empty_strip_does_nothing() {
        let mut droplet = Droplet::new(YELLOW, 5);
        let mut leds: [Rgb; 0] = [];
        droplet.render(&mut leds, false);
        assert_eq!(droplet, Droplet::new(YELLOW, 5));
    }

    #[test]
    fn test_render_uses_at_most_255_leds() {
        let mut droplet = Droplet::new(YELLOW, 5);
        let mut leds = vec![BLACK; 300];
        while droplet.is_active() {
            droplet.render(&mut leds, false);
        }
        assert_ne!(leds[254], BLACK);
        assert!(leds[255..].iter().all(|led| *led == BLACK));
    }
}
