/// Example program to print the loaded configuration
///
/// Run with: cargo run -p flip-config --example print_config

fn main() {
    let config = flip_config::FlipConfig::load();

    println!("=== FlipText Configuration ===\n");

    println!("Animation Settings:");
    println!("  Duration: {} ms", config.animation.duration_ms);
    println!("  Delay: {} ms", config.animation.delay_ms);
    println!("  Easing: {}", config.animation.easing);
    println!();

    println!("Text Settings:");
    println!("  Transition: {}", config.text.transition);
    println!("  Split Mode: {}", config.text.split_mode);
    println!("  Key Policy: {}", config.text.key_policy);
    println!("  Font Family: {:?}", config.text.font_family);
    println!("  Font Size: {}", config.text.font_size);
    println!();

    println!("Background: {:?}", config.background.rgba);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
