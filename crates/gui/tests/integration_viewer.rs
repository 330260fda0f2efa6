//! Integration tests for the model viewer lifecycle.
//!
//! Tests end-to-end: AssetLoader -> ModelViewer -> PreparedModel, with
//! several viewers sharing one cached asset.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use detail_studio_lib::assets::{AssetCache, AssetLoader};
use detail_studio_lib::viewer::{ModelViewer, ViewerProps, ViewerStatus};
use shared::{Material, Rgb, SceneGraph};

fn loader() -> AssetLoader {
    AssetLoader::new(Arc::new(AssetCache::new()))
}

fn mesh_color(scene: &SceneGraph, mesh: &str) -> Rgb {
    scene
        .find_mesh(mesh)
        .unwrap_or_else(|| panic!("missing mesh {mesh}"))
        .materials[0]
        .display_color()
}

#[test]
fn test_two_viewers_share_asset_but_not_paint() {
    let loader = loader();
    let red = ModelViewer::mount(ViewerProps::new("builtin://sedan", "#ff0000"), &loader);
    let blue = ModelViewer::mount(ViewerProps::new("builtin://sedan", "#0000ff"), &loader);

    let red_scene = &red.model().unwrap().scene;
    let blue_scene = &blue.model().unwrap().scene;
    assert_eq!(mesh_color(red_scene, "Hood_Panel"), Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(mesh_color(blue_scene, "Hood_Panel"), Rgb::new(0.0, 0.0, 1.0));

    // One fetch, one cached original, untouched by either viewer
    assert_eq!(loader.cache().len(), 1);
    let original = loader.cache().get("builtin://sedan").unwrap();
    assert_eq!(mesh_color(&original, "Hood_Panel"), Rgb::new(0.8, 0.8, 0.82));
    assert_ne!(red.id(), blue.id());
}

#[test]
fn test_glass_and_tires_keep_their_color() {
    let loader = loader();
    let viewer = ModelViewer::mount(ViewerProps::new("builtin://sedan", "orange"), &loader);
    let scene = &viewer.model().unwrap().scene;
    let original = loader.cache().get("builtin://sedan").unwrap();

    for mesh in ["Windshield", "Rear_Window", "Tire_FL"] {
        assert_eq!(mesh_color(scene, mesh), mesh_color(&original, mesh), "{mesh} was repainted");
    }
}

#[test]
fn test_painted_materials_are_clamped() {
    let loader = loader();
    let viewer = ModelViewer::mount(ViewerProps::new("builtin://suv", "silver"), &loader);
    let model = viewer.model().unwrap();
    let options = viewer.options();

    let mesh = model.scene.find_mesh("Hood_Panel").unwrap();
    match mesh.materials[0].as_ref() {
        Material::Pbr(pbr) => {
            assert!(pbr.metalness <= options.metalness_max);
            assert!(pbr.roughness >= options.roughness_min);
        }
        other => panic!("expected PBR paint, got {other:?}"),
    }
}

#[test]
fn test_model_is_normalized_to_target_size() {
    let loader = loader();
    let viewer = ModelViewer::mount(ViewerProps::new("builtin://bike", "red"), &loader);
    let model = viewer.model().unwrap();
    let size = model.bounds().size();
    let largest = size.x.max(size.y).max(size.z);
    assert!((largest - viewer.options().target_size).abs() < 1e-2);

    let center = model.bounds().center();
    assert!(center.length() < 1e-2);
}

#[test]
fn test_missing_file_shows_fallback() {
    let loader = loader();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    let mut viewer = ModelViewer::mount(
        ViewerProps::new("/definitely/not/here/car.json", "red")
            .on_error(move |e| sink.borrow_mut().push(e.to_string())),
        &loader,
    );

    for _ in 0..200 {
        if !viewer.is_loading() {
            break;
        }
        viewer.poll();
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    assert!(matches!(viewer.status(), ViewerStatus::Failed(_)));
    assert_eq!(errors.borrow().len(), 1);
    assert!(loader.cache().is_empty());
}

#[test]
fn test_file_asset_loads_through_background_runtime() {
    let dir = std::env::temp_dir().join(format!("detail-studio-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("suv.json");
    let scene = detail_studio_lib::assets::builtin::vehicle(shared::VehicleCategory::Suv);
    std::fs::write(&path, scene.to_json().unwrap()).unwrap();

    let loader = loader();
    let url = path.to_string_lossy().into_owned();
    let ready = Rc::new(RefCell::new(0));
    let counter = ready.clone();
    let mut viewer = ModelViewer::mount(
        ViewerProps::new(url.clone(), "#2e6b3a").on_ready(move |_| *counter.borrow_mut() += 1),
        &loader,
    );

    for _ in 0..200 {
        if viewer.poll() || !viewer.is_loading() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    assert_eq!(*ready.borrow(), 1);
    assert!(loader.cache().contains(&url));
    assert_eq!(
        mesh_color(&viewer.model().unwrap().scene, "Hood_Panel"),
        Rgb::parse("#2e6b3a").unwrap()
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_switching_away_ignores_late_result() {
    let loader = loader();
    let mut viewer = ModelViewer::mount(
        ViewerProps::new("/definitely/not/here/car.json", "red"),
        &loader,
    );
    viewer.set_asset_url("builtin://sedan", &loader);
    assert!(viewer.model().is_some());

    std::thread::sleep(std::time::Duration::from_millis(50));
    viewer.poll();
    assert!(viewer.model().is_some());
    assert!(viewer.error().is_none());
}
