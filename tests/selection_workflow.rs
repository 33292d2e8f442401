use eframe_crop::{EditorContext, SaveError, SelectionRect, ViewerConfig};
use egui::Pos2;
use image::{Rgb, RgbImage};
use std::path::PathBuf;

// A 1000x800 image whose pixels encode their own coordinates
fn create_test_image() -> RgbImage {
    RgbImage::from_fn(1000, 800, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 256) * 16 + y / 256) as u8]))
}

fn create_test_context() -> EditorContext {
    let mut context = EditorContext::new(ViewerConfig::default());
    context.load_image("test.png", create_test_image());
    context
}

fn drag(context: &mut EditorContext, from: (f32, f32), to: (f32, f32)) {
    context.pointer_pressed(Pos2::new(from.0, from.1));
    context.pointer_dragged(Pos2::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
    context.pointer_dragged(Pos2::new(to.0, to.1));
    context.pointer_released(Pos2::new(to.0, to.1));
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("eframe_crop_{}_{}", std::process::id(), name))
}

#[test]
fn test_select_and_crop() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (400.0, 300.0));

    assert_eq!(context.selection_rect(), Some(SelectionRect::new(100.0, 100.0, 400.0, 300.0)));

    let cropped = context.cropped().expect("crop after release");
    // (height, width) = (200, 300)
    assert_eq!(cropped.height(), 200);
    assert_eq!(cropped.width(), 300);
    assert_eq!(cropped.get_pixel(0, 0), create_test_image().get_pixel(100, 100));

    assert_eq!(context.history().undo_stack().len(), 1);
    assert_eq!(context.history().redo_stack().len(), 0);
}

#[test]
fn test_undo_then_redo_selection() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (400.0, 300.0));

    assert!(context.undo());
    assert_eq!(context.selection_rect(), None);
    assert!(context.cropped().is_none());
    assert_eq!(context.history().undo_stack().len(), 0);
    assert_eq!(context.history().redo_stack().len(), 1);
    assert!(!context.can_undo());
    assert!(context.can_redo());

    assert!(context.redo());
    assert_eq!(context.selection_rect(), Some(SelectionRect::new(100.0, 100.0, 400.0, 300.0)));
    assert_eq!(context.cropped().map(|c| c.dimensions()), Some((300, 200)));
}

#[test]
fn test_backwards_drag_crops_same_region() {
    let mut forward = create_test_context();
    drag(&mut forward, (100.0, 100.0), (400.0, 300.0));

    let mut backward = create_test_context();
    drag(&mut backward, (400.0, 300.0), (100.0, 100.0));

    assert_eq!(forward.cropped(), backward.cropped());
    assert_eq!(forward.preview(), backward.preview());
}

#[test]
fn test_preview_dims_outside_selection() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (400.0, 300.0));
    let source = create_test_image();
    let preview = context.preview().expect("preview after release");

    // Inside untouched
    assert_eq!(preview.get_pixel(250, 200), source.get_pixel(250, 200));
    assert_eq!(preview.get_pixel(100, 100), source.get_pixel(100, 100));

    // Outside is round(source * 0.4)
    for &(x, y) in &[(50u32, 50u32), (400, 300), (999, 799), (250, 99)] {
        let src = source.get_pixel(x, y).0;
        let out = preview.get_pixel(x, y).0;
        for c in 0..3 {
            let expected = (src[c] as f32 * 0.4).round() as i32;
            assert!((out[c] as i32 - expected).abs() <= 1, "pixel ({x}, {y}) channel {c}");
        }
    }
}

#[test]
fn test_handle_drag_resizes_and_commits() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (400.0, 300.0));

    // Bottom handle midpoint is (250, 300)
    drag(&mut context, (252.0, 305.0), (260.0, 500.0));

    assert_eq!(context.selection_rect(), Some(SelectionRect::new(100.0, 100.0, 400.0, 500.0)));
    assert_eq!(context.cropped().map(|c| c.dimensions()), Some((300, 400)));
    assert_eq!(context.history().undo_stack().len(), 2);

    assert!(context.undo());
    assert_eq!(context.selection_rect(), Some(SelectionRect::new(100.0, 100.0, 400.0, 300.0)));
}

#[test]
fn test_click_away_from_handles_starts_new_selection() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (400.0, 300.0));

    context.pointer_pressed(Pos2::new(600.0, 600.0));
    assert_eq!(context.selection_rect(), Some(SelectionRect::new(600.0, 600.0, 600.0, 600.0)));
    assert_eq!(context.selection().active_handle(), None);
}

#[test]
fn test_save_without_selection_fails() {
    let mut context = create_test_context();
    let path = temp_path("nothing.png");

    let err = context.save(&path).unwrap_err();
    assert!(matches!(err, SaveError::NoCrop));
    assert!(!path.exists());
    assert!(context.status().is_error());
}

#[test]
fn test_save_degenerate_selection_fails() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (100.0, 300.0));
    let path = temp_path("empty.png");

    let err = context.save(&path).unwrap_err();
    assert!(matches!(err, SaveError::EmptyCrop { width: 0, height: 200 }));
    assert!(!path.exists());
}

#[test]
fn test_save_and_reload_crop() {
    let mut context = create_test_context();
    drag(&mut context, (10.0, 20.0), (110.0, 70.0));

    // No extension: the default png is appended
    let written = context.save(&temp_path("crop")).unwrap();
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));

    let reloaded = image::open(&written).unwrap().to_rgb8();
    assert_eq!(reloaded.dimensions(), (100, 50));
    assert_eq!(&reloaded, context.cropped().unwrap());

    let mut viewer = EditorContext::default();
    viewer.load(&written).unwrap();
    assert_eq!(viewer.image().map(|i| i.source().dimensions()), Some((100, 50)));

    std::fs::remove_file(&written).ok();
}

#[test]
fn test_load_rejects_non_image_file() {
    let path = temp_path("not_an_image.png");
    std::fs::write(&path, b"plain text").unwrap();

    let mut context = EditorContext::default();
    let err = context.load(&path).unwrap_err();
    assert!(matches!(err, eframe_crop::LoadError::Decode { .. }));
    assert!(context.image().is_none());

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_loading_new_image_resets_selection() {
    let mut context = create_test_context();
    drag(&mut context, (100.0, 100.0), (400.0, 300.0));

    context.load_image("other.png", RgbImage::new(50, 50));
    assert_eq!(context.selection_rect(), None);
    assert!(!context.can_undo());
    assert!(context.cropped().is_none());
}

#[test]
fn test_downscaled_display_exports_source_resolution() {
    let config = ViewerConfig {
        max_display_size: Some([500, 500]),
        ..Default::default()
    };
    let mut context = EditorContext::new(config);
    context.load_image("big.png", create_test_image());

    // 1000x800 shown at 500x400
    assert_eq!(context.image().map(|i| i.display().dimensions()), Some((500, 400)));

    drag(&mut context, (50.0, 50.0), (200.0, 150.0));
    assert_eq!(context.preview().map(|p| p.dimensions()), Some((500, 400)));
    assert_eq!(context.cropped().map(|c| c.dimensions()), Some((300, 200)));
}
