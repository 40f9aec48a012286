// src/main.rs - Smoke-tests the Salil Music Player backend API

use playlist_probe::{ApiProbe, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    let config = Config::from_env();

    let mut probe = match ApiProbe::new(config) {
        Ok(probe) => probe,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let success = probe.run_all().await;

    let summary = probe.summary();
    println!("\n📊 Detailed Summary:");
    println!("   Success Rate: {:.1}%", summary.success_rate);
    println!("   Total Tests: {}", summary.total_tests);
    println!("   Passed: {}", summary.passed);
    println!("   Failed: {}", summary.failed);

    if !success {
        println!("\n❌ Critical Issues Found:");
        for result in &summary.details {
            if !result.success {
                println!("   - {}: {}", result.test, result.message);
            }
        }
    }

    std::process::exit(if success { 0 } else { 1 });
}
