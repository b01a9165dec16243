use anyhow::Result;
use flip_config::FlipConfig;
use flip_text::animation::{FlipAnimator, FlipEvent, TransitionSpec};
use flip_text::{FlipStyle, FlipText, Size, TextBinding, Visibility};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One display refresh at 60 Hz.
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Print every n-th frame.
const SAMPLE_EVERY: usize = 6;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = FlipConfig::load();
    let style = FlipStyle::from_config(&config)?;
    let spec = TransitionSpec::from_config(&config)?;
    info!(
        transition = %style.transition,
        duration_ms = spec.duration_ms,
        easing = %spec.easing,
        "flip demo starting"
    );

    // Monospace cell sized off the configured font
    let cell = Size::new(f64::from(style.font.size) * 0.6, f64::from(style.font.size) * 1.2);

    let text = TextBinding::new("Hello");
    let component = FlipText::with_style(text.clone(), style);
    let mut animator = FlipAnimator::for_component(&component, spec);

    for next in ["World", "Hello"] {
        info!(from = %animator.tree().text(), to = next, "toggling text");
        text.set(next);
        animator.sync(&component);
        report(&mut animator);

        let mut frame = 0;
        while animator.update(FRAME_MS) {
            frame += 1;
            if frame % SAMPLE_EVERY == 0 {
                print_frame(frame, &animator, cell);
            }
            report(&mut animator);
        }
        report(&mut animator);
        println!("settled on {:?} after {frame} frames", animator.tree().text());
    }

    Ok(())
}

fn print_frame(frame: usize, animator: &FlipAnimator, cell: Size) {
    let row: Vec<String> = animator
        .frames(|_| cell)
        .into_iter()
        .map(|unit| match unit.frame.visibility {
            Visibility::Hidden => format!("[{} hidden]", unit.text),
            Visibility::Visible => format!(
                "[{} {:>4.0}° x{:.2} a{:.2}]",
                unit.text,
                unit.frame.rotation.to_degrees(),
                unit.frame.scale,
                unit.frame.opacity
            ),
        })
        .collect();
    println!("{frame:>3}: {}", row.join(" "));
}

fn report(animator: &mut FlipAnimator) {
    for event in animator.drain_events() {
        match &event {
            FlipEvent::Started { key, phase, .. } => info!(%key, ?phase, "started"),
            FlipEvent::Reversed { key, phase, .. } => info!(%key, ?phase, "reversed"),
            FlipEvent::Ended { key, phase, .. } => info!(%key, ?phase, "ended"),
        }
    }
}
