//! # ASCII Smoke
//!
//! Drives a `SmokeHost` with a terminal renderer to show the render adapter
//! seam. Every 30 frames the quads are binned into a character grid; the
//! field switches to the active speed halfway through.
//!
//! Run with: `cargo run --example ascii_smoke`

use wisp::prelude::*;

const COLS: usize = 60;
const ROWS: usize = 20;
const RAMP: &[u8] = b" .:-=+*#%@";

struct AsciiRenderer {
    size: SurfaceSize,
    frame: u64,
}

impl RenderAdapter for AsciiRenderer {
    fn prepare(&mut self, texture: &TextureData, pool_size: usize) -> Result<(), SmokeError> {
        println!(
            "prepared {} quads with a {}x{} texture",
            pool_size, texture.width, texture.height
        );
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn draw(&mut self, quads: &[QuadInstance]) -> Result<(), SmokeError> {
        self.frame += 1;
        if self.frame % 30 != 0 {
            return Ok(());
        }

        let mut grid = [[0.0f32; COLS]; ROWS];
        for q in quads {
            let col = ((q.position[0] + 300.0) / 600.0 * COLS as f32) as isize;
            let row = ((400.0 - q.position[1]) / 900.0 * ROWS as f32) as isize;
            if (0..COLS as isize).contains(&col) && (0..ROWS as isize).contains(&row) {
                grid[row as usize][col as usize] += q.opacity * q.scale;
            }
        }

        println!("frame {} ({}x{})", self.frame, self.size.width, self.size.height);
        for row in grid.iter() {
            let line: String = row
                .iter()
                .map(|&v| {
                    let idx = ((v / 0.15) * (RAMP.len() - 1) as f32) as usize;
                    RAMP[idx.min(RAMP.len() - 1)] as char
                })
                .collect();
            println!("|{}|", line);
        }
        Ok(())
    }

    fn release(&mut self) {
        println!("released after {} frames", self.frame);
    }
}

fn main() -> Result<(), SmokeError> {
    env_logger::init();

    let config = SmokeConfig::default()
        .with_field(FieldConfig::default().with_pool_size(120).with_seed(42))
        .with_texture(TextureSource::Procedural { size: 64 });

    let mut host = SmokeHost::new(config);
    host.mount(SurfaceSize::new(0, 0), |size, _scene| {
        Ok(AsciiRenderer { size, frame: 0 })
    })?;

    let mut pending = true;
    for frame in 0..240u32 {
        if frame == 120 {
            println!("-- activating --");
            host.set_active(true);
        }
        if !pending {
            break;
        }
        pending = false;
        let mut schedule = || pending = true;
        host.frame_at(1.0 / 60.0, frame as f32 / 60.0, &mut schedule)?;
    }

    println!(
        "speed {:.2} -> target {:.2}",
        host.speed().current(),
        host.speed().target()
    );
    host.unmount();
    Ok(())
}
