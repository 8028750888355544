// Generates a 257×257 synthetic terrain and saves:
// the heightmap itself
// AO baked with the 4 axis sweeps
// AO baked with all 8 sweeps
// the terrain shaded with the 8-sweep AO

use ao_core::{AoConfig, Direction, HeightField, composite_preview, compute_ao, to_ao_image};
use image::{GrayImage, Luma};
use std::path::Path;

fn main() {
    let size = 257;
    // Ridged dunes with a crater
    let field = HeightField::from_fn(size, size, |x, y| {
        let fx = x as f32 / size as f32;
        let fy = y as f32 / size as f32;
        let dunes = ((fx * 12.0).sin() * (fy * 5.0).cos()).abs() * 90.0;
        let dx = fx - 0.6;
        let dy = fy - 0.4;
        let r = (dx * dx + dy * dy).sqrt();
        let crater = if r < 0.15 { -60.0 * (1.0 - r / 0.15) } else { 0.0 };
        (dunes + crater + 100.0).clamp(0.0, 255.0)
    })
    .unwrap();

    let gray = GrayImage::from_fn(size as u32, size as u32, |x, y| {
        Luma([field.heights()[y as usize * size + x as usize] as u8])
    });
    gray.save(Path::new("terrain_height.png")).unwrap();
    println!("Saved terrain_height.png");

    let axis = compute_ao(&field, &AoConfig::default().with_directions(Direction::AXIS)).unwrap();
    to_ao_image(&axis).save(Path::new("terrain_ao4.png")).unwrap();
    println!("Saved terrain_ao4.png");

    let full = compute_ao(&field, &AoConfig::default()).unwrap();
    to_ao_image(&full).save(Path::new("terrain_ao8.png")).unwrap();
    println!("Saved terrain_ao8.png");

    composite_preview(&field, &full)
        .unwrap()
        .save(Path::new("terrain_shaded.png"))
        .unwrap();
    println!("Saved terrain_shaded.png");
}
