use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{
    compose::model::LayerKind,
    foundation::time::from_unix_seconds,
    mint::decode::ClassFlags,
};

const NOW: u64 = 1_760_000_000;

fn asset(vmu_count: u64) -> XenftAsset {
    XenftAsset::new(
        1234,
        vmu_count,
        DecodedMintInfo {
            class_flags: Some(ClassFlags {
                is_apex: true,
                ..ClassFlags::default()
            }),
            eaa: 15,
            amp: 3000,
            rank: u128::MAX,
            maturity_ts: NOW + 10 * SECONDS_PER_DAY + 5,
            term: 100,
            redeemed: false,
        },
        15_000_000,
    )
}

fn circles(img: &ImageDescription) -> Vec<(Point, f64, f64)> {
    img.layer("circles")
        .unwrap()
        .elements
        .iter()
        .map(|e| match e {
            Element::Circle {
                center,
                radius,
                style,
            } => (*center, *radius, style.opacity),
            other => panic!("unexpected element {other:?}"),
        })
        .collect()
}

#[test]
fn visual_params_follow_vmu_count() {
    let p = VisualParams::for_vmu(0);
    assert_eq!(p.circle_count, 0);
    assert_eq!(p.circle_radius, 30.0);
    assert_eq!(p.pattern_density, 1.0);
    assert_eq!(p.line_count, 20);

    let p = VisualParams::for_vmu(100);
    assert_eq!(p.circle_count, 20);
    assert_eq!(p.circle_radius, 40.0);
    assert_eq!(p.pattern_density, 3.0);
    assert_eq!(p.line_count, 60);

    let p = VisualParams::for_vmu(500);
    assert_eq!(p.circle_count, 20);
    assert_eq!(p.circle_radius, 80.0);
    assert_eq!(p.pattern_density, 5.0);
    assert_eq!(p.line_count, 100);

    assert_eq!(VisualParams::for_vmu(10_000).circle_radius, 100.0);
}

#[test]
fn zero_vmus_draw_no_circles() {
    let img = compose(&asset(0), from_unix_seconds(NOW));
    assert!(img.layer("circles").unwrap().elements.is_empty());
    assert!(img.layer("motif").is_some());
    assert!(img.to_svg().contains("XENFT #1234"));
}

#[test]
fn large_vmu_counts_are_clamped() {
    let img = compose(&asset(500), from_unix_seconds(NOW));
    let cs = circles(&img);
    assert_eq!(cs.len(), 20);
    let max_radius = cs.iter().map(|c| c.1).fold(0.0, f64::max);
    assert!(max_radius <= 100.0);
    // i = 10 sits at sin(pi/2) == 1, i.e. the full base radius.
    assert!((cs[10].1 - 80.0).abs() < 1e-9);

    let big = compose(&asset(5_000), from_unix_seconds(NOW));
    let cs = circles(&big);
    assert_eq!(cs.len(), 20);
    assert!((cs[10].1 - 100.0).abs() < 1e-9);
}

#[test]
fn circles_sit_on_the_ellipse_with_rising_opacity() {
    let img = compose(&asset(4), from_unix_seconds(NOW));
    let cs = circles(&img);
    assert_eq!(cs.len(), 4);

    assert!((cs[0].0.x - 500.0).abs() < 1e-9);
    assert!((cs[0].0.y - 200.0).abs() < 1e-9);
    assert!((cs[1].0.x - 200.0).abs() < 1e-9);
    assert!((cs[1].0.y - 350.0).abs() < 1e-9);

    assert!((cs[0].1 - 15.2).abs() < 1e-9);
    assert!((cs[0].2 - 0.3).abs() < 1e-9);
    assert!((cs[3].2 - 1.0).abs() < 1e-9);
    for w in cs.windows(2) {
        assert!(w[1].2 > w[0].2);
    }
}

#[test]
fn motif_uses_rarity_and_scheme_colors() {
    let now = from_unix_seconds(NOW);
    let scheme = cycle::current_scheme(now);
    let img = compose(&asset(5), now);
    let motif = &img.layer("motif").unwrap().elements;
    assert_eq!(motif.len(), 2);
    match &motif[0] {
        Element::Circle { style, .. } => assert_eq!(style.stroke, Some(scheme.secondary)),
        other => panic!("expected ring, got {other:?}"),
    }
    match &motif[1] {
        Element::Polygon { points, style } => {
            assert_eq!(points.len(), 4);
            assert_eq!(style.fill, Some(Color::GOLD));
        }
        other => panic!("expected diamond, got {other:?}"),
    }
    assert_eq!(img.background, scheme.background);
}

#[test]
fn text_overlay_carries_token_fields() {
    let now = from_unix_seconds(NOW);
    let scheme = cycle::current_scheme(now);
    let img = compose(&asset(7), now);
    let texts = img.texts();
    assert!(texts.contains(&"XENFT #1234"));
    assert!(texts.contains(&"Apex Xunicorn"));
    assert!(texts.contains(&"VMUs: 7"));
    assert!(texts.contains(&"Term: 100 days"));
    assert!(texts.contains(&"Rank: 340282366920938463463374607431768211455"));
    assert!(texts.contains(&"AMP: 3000  EAA: 15"));
    assert!(texts.contains(&"Maturing: 10 days"));
    let cycle_text = format!("Cycle {}/12", scheme.cycle_number());
    assert!(texts.contains(&cycle_text.as_str()));
    let countdown = format!("Next cycle in {} days", scheme.days_until_next_cycle);
    assert!(texts.contains(&countdown.as_str()));
}

#[test]
fn maturity_status_boundaries() {
    let now = from_unix_seconds(1_000_000);
    assert_eq!(MaturityStatus::at(999_999, now), MaturityStatus::Matured);
    assert_eq!(
        MaturityStatus::at(1_000_000, now),
        MaturityStatus::Maturing {
            days_to_maturity: 0
        }
    );
    assert_eq!(
        MaturityStatus::at(1_000_000 + 2 * SECONDS_PER_DAY - 1, now),
        MaturityStatus::Maturing {
            days_to_maturity: 1
        }
    );
    assert_eq!(MaturityStatus::Matured.label(), "Matured");
}

#[test]
fn deterministic_layers_repeat_exactly() {
    let now = from_unix_seconds(NOW);
    let a = compose(&asset(37), now);
    let b = compose(&asset(37), now);
    assert_eq!(a.without_decorations(), b.without_decorations());
    assert_eq!(
        a.without_decorations().to_svg(),
        b.without_decorations().to_svg()
    );
    assert_eq!(a.deterministic_fingerprint(), b.deterministic_fingerprint());
}

#[test]
fn decorations_follow_density_and_palette() {
    let now = from_unix_seconds(NOW);
    let scheme = cycle::current_scheme(now);
    let mut rng = StdRng::seed_from_u64(7);
    let img = compose_with(&asset(100), now, &ComposeSettings::default(), &mut rng);
    let deco = img.layer("decorations").unwrap();
    assert_eq!(deco.kind, LayerKind::Decoration);
    assert_eq!(deco.elements.len(), 60);
    for e in &deco.elements {
        let Element::Line { from, to, style } = e else {
            panic!("decorations must be lines");
        };
        assert!((0.0..400.0).contains(&from.x));
        assert!((0.0..400.0).contains(&from.y));
        let len = from.distance(*to);
        assert!((20.0 - 1e-9..=100.0 + 1e-9).contains(&len));
        assert_eq!(style.stroke, Some(scheme.tertiary));
        assert!(style.opacity < 0.5);
    }
}

#[test]
fn decorations_can_be_disabled() {
    let mut rng = StdRng::seed_from_u64(1);
    let settings = ComposeSettings { decorations: false };
    let img = compose_with(&asset(3), from_unix_seconds(NOW), &settings, &mut rng);
    assert!(img.layer("decorations").is_none());
    assert!(img.layers.iter().all(|l| l.kind == LayerKind::Deterministic));
}

#[test]
fn missing_token_id_renders_error_image() {
    let mut a = asset(3);
    a.token_id = None;
    let mut rng = StdRng::seed_from_u64(1);
    let now = from_unix_seconds(NOW);
    assert!(try_compose_with(&a, now, &ComposeSettings::default(), &mut rng).is_err());

    let img = compose(&a, now);
    assert!(img.layer("error").is_some());
    assert!(img.layer("circles").is_none());
    assert_eq!(img.background, Color::ERROR_BACKGROUND);
}

#[test]
fn unknown_class_still_composes() {
    let mut a = asset(3);
    a.mint_info.class_flags = None;
    let img = compose(&a, from_unix_seconds(NOW));
    assert!(img.texts().contains(&"Unknown Unknown"));
    match &img.layer("motif").unwrap().elements[1] {
        Element::Polygon { style, .. } => assert_eq!(style.fill, Some(Color::NEUTRAL_GRAY)),
        other => panic!("expected diamond, got {other:?}"),
    }
}
