use image::{DynamicImage, Rgba, RgbaImage};
use sprite_grid_core::prelude::*;

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(rgba)))
}

#[test]
fn pixels_land_in_assigned_cells_on_transparent_background() {
    let red = [255, 0, 0, 255];
    let green = [0, 255, 0, 255];
    let blue = [0, 0, 255, 128];
    let records = vec![
        ImageRecord::new("red", solid_image(8, 8, red)),
        ImageRecord::new("green", solid_image(4, 6, green)),
        ImageRecord::new("blue", solid_image(8, 2, blue)),
    ];
    let cfg = SheetConfig::builder().padding(2).build();
    let out = pack_sheet(records, &cfg).expect("pack");
    let canvas = &out.canvas;
    assert_eq!(canvas.dimensions(), (20, 20));

    for (name, color) in [("red", red), ("green", green), ("blue", blue)] {
        let e = &out.document.images[name];
        for y in e.y..e.y + e.height {
            for x in e.x..e.x + e.width {
                assert_eq!(canvas.get_pixel(x, y).0, color, "{name} at ({x},{y})");
            }
        }
    }

    // cell remainder and padding stay transparent
    let green_e = &out.document.images["green"];
    assert_eq!(canvas.get_pixel(green_e.x + 4, green_e.y).0, [0, 0, 0, 0]);
    assert_eq!(canvas.get_pixel(9, 0).0, [0, 0, 0, 0]);
    // the fourth cell is empty
    assert!((10..20).all(|x| (10..20).all(|y| canvas.get_pixel(x, y).0 == [0, 0, 0, 0])));
}

#[test]
fn non_rgba_inputs_are_composited_as_rgba() {
    let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(3, 3, image::Luma([77])));
    let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(3, 3, image::Rgb([1, 2, 3])));
    let out = pack_sheet(
        vec![ImageRecord::new("g", gray), ImageRecord::new("c", rgb)],
        &SheetConfig::default(),
    )
    .expect("pack");
    assert_eq!(out.canvas.get_pixel(0, 0).0, [77, 77, 77, 255]);
    assert_eq!(out.canvas.get_pixel(3, 0).0, [1, 2, 3, 255]);
}

#[test]
fn composing_past_canvas_edge_reports_the_image() {
    // hand-built plan smaller than the image to force a copy failure
    let plan = LayoutPlan {
        grid_size: 1,
        cell_width: 4,
        cell_height: 4,
        sheet_width: 4,
        sheet_height: 4,
    };
    let records = vec![ImageRecord::new("big.png", solid_image(6, 6, [9, 9, 9, 255]))];
    let placements = assign_placements(&records, &plan);
    match compose_sheet(&plan, &records, &placements) {
        Err(SpriteSheetError::Composition { filename, .. }) => assert_eq!(filename, "big.png"),
        Err(e) => panic!("expected Composition error, got {e}"),
        Ok(_) => panic!("expected Composition error"),
    }
}
