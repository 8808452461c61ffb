//! swipe_snake — interactive entry point.

use swipe_snake::app;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Swipe Snake — wave a green thing, eat the apples      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: live camera tracking + keyboard");
    #[cfg(not(feature = "camera"))]
    println!("  Mode: keyboard only  (use --features camera for swipe tracking)");
    println!();
    println!("  W/A/S/D steer, E quits.  Press any key in the game window to start.");
    println!();

    match play() {
        Ok(score) => println!("  Final score: {}", score),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "camera")]
fn play() -> Result<u32, String> {
    let mut feed = swipe_snake::camera::CameraFeed::open()?;
    app::run(&mut feed)
}

#[cfg(not(feature = "camera"))]
fn play() -> Result<u32, String> {
    app::run(&mut app::NoFeed)
}
