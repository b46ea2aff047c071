// tests/basic_topology.rs
use glam::{Vec3, Vec4};
use mover_scene::{
    Articulated, ConverterConfig, FixedColor, Limb, Mover, MoverConverter, SegmentEnd, SequentialNames,
};

const GREY: FixedColor = FixedColor(Vec4::new(0.5, 0.5, 0.5, 1.0));

fn setup() -> (MoverConverter, Mover) {
    let converter = MoverConverter::new(ConverterConfig::default());
    let mover = Mover::named(2.0, "torso").unwrap();
    (converter, mover)
}

/// Drop the `rgba="..."` attribute from every line.
fn strip_colors(scene: &str) -> String {
    scene
        .lines()
        .map(|line| match line.find(" rgba=\"") {
            Some(start) => {
                let rest = &line[start + 7..];
                let end = rest.find('"').unwrap();
                format!("{}{}", &line[..start], &rest[end + 1..])
            }
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_lone_torso() {
    let (converter, mover) = setup();

    // Torso length 2 starting at (0, 2, 1): terminus (0, 2, -1), center (0, 2, 0).
    let text = converter.convert_with(&mover, GREY);
    let expected = concat!(
        "<body name=\"mover\" euler=\"0 0 0\">\n",
        "  <body name=\"torso-0-body\" pos=\"0 2 0\">\n",
        "    <geom name=\"torso-0-geom\" type=\"box\" size=\"1 1 2\" pos=\"0 2 0\" rgba=\"0.5 0.5 0.5 1\"/>\n",
        "  </body>\n",
        "</body>",
    );
    assert_eq!(text, expected);
}

#[test]
fn test_terminus_child_hangs_below_torso() {
    let (converter, mut mover) = setup();
    mover
        .torso_mut()
        .first_segment_mut()
        .attach_to_terminus(Limb::named(1.0, "leg").unwrap());

    let scene = converter.build_scene(&mover, GREY);
    let torso = &scene.children[0];
    assert_eq!(torso.name, "torso-0-body");
    assert_eq!(torso.children.len(), 1, "Child should nest inside the torso body");

    // Leg starts at the torso terminus (0, 2, -1) and extends 1 down.
    let leg = &torso.children[0];
    assert_eq!(leg.name, "leg-0-body");
    assert_eq!(leg.pos, Some(Vec3::new(0.0, 2.0, -1.5)));
    assert_eq!(leg.geoms[0].size, Vec3::new(1.0, 1.0, 1.0));

    let text = scene.to_string();
    let leg_at = text.find("leg-0-body").unwrap();
    let torso_close = text.rfind("  </body>\n</body>").unwrap();
    assert!(leg_at < torso_close);
}

#[test]
fn test_origin_child_starts_at_torso_origin() {
    let (converter, mut mover) = setup();
    mover
        .torso_mut()
        .first_segment_mut()
        .attach(SegmentEnd::Origin, Limb::named(1.0, "neck").unwrap());

    let scene = converter.build_scene(&mover, GREY);
    let neck = scene.find("neck-0-body").unwrap();
    assert_eq!(neck.pos, Some(Vec3::new(0.0, 2.0, 0.5)));
    assert_eq!(neck.geoms[0].pos, Vec3::new(0.0, 2.0, 0.5));
}

#[test]
fn test_one_geom_per_segment_and_depth() {
    let mut names = SequentialNames::new("limb");
    let mut mover = Mover::generated(2.0, &mut names).unwrap();

    let mut arm = Limb::generated(1.0, &mut names).unwrap();
    let mut hand = Limb::generated(0.5, &mut names).unwrap();
    hand.first_segment_mut().attach_all(
        SegmentEnd::Terminus,
        [
            Limb::generated(0.1, &mut names).unwrap(),
            Limb::generated(0.1, &mut names).unwrap(),
        ],
    );
    arm.first_segment_mut().attach_to_terminus(hand);

    let torso = mover.torso_mut().first_segment_mut();
    torso.attach_to_origin(arm);
    torso.attach_to_terminus(Limb::generated(1.5, &mut names).unwrap());

    let converter = MoverConverter::default();
    let scene = converter.build_scene(&mover, GREY);
    let text = converter.convert_with(&mover, GREY);

    assert_eq!(mover.segment_count(), 6);
    assert_eq!(scene.geom_count(), 6);
    assert_eq!(text.matches("<geom ").count(), 6);
    // Root group plus torso -> arm -> hand -> finger.
    assert_eq!(scene.depth(), mover.torso().depth() + 1);
    assert_eq!(scene.depth(), 5);
}

#[test]
fn test_conversions_differ_only_in_color() {
    let (converter, mut mover) = setup();
    mover
        .torso_mut()
        .first_segment_mut()
        .attach_to_terminus(Limb::named(1.0, "leg").unwrap());

    let a = converter.convert(&mover);
    let b = converter.convert(&mover);
    assert_eq!(strip_colors(&a), strip_colors(&b));
    assert_eq!(a.matches(" 1\"/>").count(), 2, "Alpha should always be 1");
}

#[test]
fn test_duplicate_attachment_is_emitted_twice() {
    let (converter, mut mover) = setup();
    let leg = Limb::named(1.0, "leg").unwrap();
    let torso = mover.torso_mut().first_segment_mut();
    torso.attach_to_terminus(leg.clone());
    torso.attach_to_terminus(leg);

    let text = converter.convert_with(&mover, GREY);
    assert_eq!(text.matches("name=\"leg-0-body\"").count(), 2);
}

#[test]
fn test_extended_limb_is_a_straight_line() {
    let (converter, mut mover) = setup();
    mover.torso_mut().extend(1.0).unwrap();

    let scene = converter.build_scene(&mover, GREY);
    assert_eq!(scene.children.len(), 2, "Segments of one limb are siblings");
    assert_eq!(scene.children[0].pos, Some(Vec3::new(0.0, 2.0, 0.0)));
    assert_eq!(scene.children[1].name, "torso-1-body");
    assert_eq!(scene.children[1].pos, Some(Vec3::new(0.0, 2.0, -1.5)));
}
