use insta::assert_snapshot;
use svgshim::{AffineMatrix, Document, Element, TransformItem, TransformKind};

fn transform_attr(el: &Element) -> String {
    el.get_attribute("transform").unwrap_or("<none>").to_string()
}

#[test]
fn append_then_consolidate() {
    let mut g = Element::new("g");
    {
        let mut transform = g.transform();
        let list = transform.base_val();
        list.append_item(TransformItem::translate(5.0, 5.0));
    }
    assert_snapshot!(transform_attr(&g), @"translate(5, 5)");

    let consolidated = g.transform().base_val().consolidate();
    assert!(consolidated.is_some());
    assert_eq!(g.transform().base_val().number_of_items(), 1);
    assert_snapshot!(transform_attr(&g), @"translate(5, 5)");
}

#[test]
fn three_translates_consolidate_to_their_sum() {
    let mut g = Element::new("g");
    {
        let mut list = g.transform_list_mut();
        list.append_item(TransformItem::translate(1.0, 2.0));
        list.append_item(TransformItem::translate(3.0, 4.0));
        list.append_item(TransformItem::translate(5.0, 6.0));
    }
    assert_snapshot!(transform_attr(&g), @"translate(1, 2) translate(3, 4) translate(5, 6)");

    let item = g.transform_list_mut().consolidate().unwrap();
    assert_eq!(item.kind(), TransformKind::Matrix);
    assert_eq!(item.matrix(), AffineMatrix::translation(9.0, 12.0));
    assert_snapshot!(transform_attr(&g), @"translate(9, 12)");
}

#[test]
fn scale_items_serialize_as_matrix() {
    let mut g = Element::new("g");
    {
        let mut list = g.transform_list_mut();
        list.append_item(TransformItem::scale(2.0, 2.0));
        list.append_item(TransformItem::translate(10.0, 0.5));
    }
    assert_snapshot!(transform_attr(&g), @"matrix(2, 0, 0, 2, 0, 0) translate(10, 0.5)");
}

#[test]
fn seeded_from_existing_attribute() {
    let mut doc = Document::parse(
        r#"<svg><g id="n" transform="translate(10,20) scale(2)"><rect width="4" height="4"/></g></svg>"#,
    )
    .unwrap();
    let g = doc.get_element_by_id_mut("n").unwrap();
    {
        let mut list = g.transform_list_mut();
        assert_eq!(list.number_of_items(), 2);
        assert_eq!(list.get_item(1).map(|i| i.kind()), Some(TransformKind::Scale));
        // past the end appends
        list.insert_item_before(TransformItem::scale(0.5, 0.5), 99);
    }
    assert_snapshot!(
        transform_attr(g),
        @"translate(10, 20) matrix(2, 0, 0, 2, 0, 0) matrix(0.5, 0, 0, 0.5, 0, 0)"
    );

    g.transform_list_mut().consolidate();
    assert_snapshot!(transform_attr(g), @"translate(10, 20)");
}

#[test]
fn in_place_edits_and_replacement() {
    let mut g = Element::new("g");
    {
        let mut transform = g.transform();
        let list = transform.anim_val();
        list.initialize(TransformItem::translate(1.0, 1.0));
        list.append_item(TransformItem::translate(2.0, 2.0));
        list.with_item_mut(0, |item| item.set_scale(3.0, 1.0));
        list.replace_item(TransformItem::translate(-4.0, 0.0), 1);
    }
    assert_snapshot!(transform_attr(&g), @"matrix(3, 0, 0, 1, 0, 0) translate(-4, 0)");

    g.transform().base_val().remove_item(0);
    assert_snapshot!(transform_attr(&g), @"translate(-4, 0)");

    g.transform().base_val().clear();
    assert_snapshot!(transform_attr(&g), @"<none>");
}

#[test]
fn base_and_anim_val_share_one_list() {
    let mut g = Element::new("g");
    let mut transform = g.transform();
    transform.base_val().append_item(TransformItem::translate(1.0, 0.0));
    assert_eq!(transform.anim_val().number_of_items(), 1);
    transform.anim_val().append_item(TransformItem::translate(0.0, 1.0));
    assert_eq!(transform.base_val().number_of_items(), 2);
    assert_eq!(transform.base_val().matrix(), AffineMatrix::translation(1.0, 1.0));
}

#[test]
fn skew_functions_become_matrix_items() {
    let mut g = Element::new("g").with_attribute("transform", "skewX(45) skewY(10)");
    let list = g.transform_list_mut();
    let kinds: Vec<_> = list.iter().map(|i| i.kind()).collect();
    assert_eq!(kinds, vec![TransformKind::Matrix, TransformKind::Matrix]);
    let c = list.get_item(0).map(|i| i.matrix().c).unwrap_or_default();
    assert!((c - 1.0).abs() < 1e-9);
}

#[test]
fn rotation_about_centre_keeps_centre_fixed() {
    let mut g = Element::new("g");
    let mut list = g.transform_list_mut();
    let item = list.append_item(TransformItem::rotate(90.0, 50.0, 50.0));
    assert_eq!(item.kind(), TransformKind::Rotate);
    assert_eq!(item.angle(), 90.0);
    let (x, y) = list.matrix().transform_point(50.0, 50.0);
    assert!((x - 50.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
    let (x, y) = list.matrix().transform_point(60.0, 50.0);
    assert!((x - 50.0).abs() < 1e-9 && (y - 60.0).abs() < 1e-9);
}

#[test]
fn factories_from_root() {
    let svg = Element::new("svg");
    let item = svg.create_svg_transform_from_matrix(AffineMatrix::scaling(2.0, 2.0));
    assert_eq!(item.kind(), TransformKind::Matrix);
    assert_snapshot!(item.to_string(), @"matrix(2, 0, 0, 2, 0, 0)");
    assert_snapshot!(svg.create_svg_transform().to_string(), @"translate(0, 0)");
}
