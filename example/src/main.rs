//! Drives two sliders through a scripted session against the in-memory host
//! and logs what they report.
//!
//! Run with `RUST_LOG=rangeable=trace` to see every listener and commit.

use std::time::{Duration, Instant};

use rangeable::{
    Attribute, Host, Key, Mode, PointerKind, Rangeable, SliderCallbacks, SliderConfig,
    SliderEvent, SliderValue, TooltipSlot, TooltipVisibility,
    testing::{FakeDocument, FakeHost},
};
use tracing::{error, info, warn};

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,example=info,rangeable=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

fn callbacks(name: &'static str) -> SliderCallbacks {
    SliderCallbacks::new()
        .on_init(move |value: SliderValue| info!(name, ?value, "ready"))
        .on_start(move |value: SliderValue| info!(name, ?value, "drag start"))
        .on_change(move |value: SliderValue| info!(name, ?value, "changed"))
        .on_end(move |value: SliderValue| info!(name, ?value, "drag end"))
}

fn drag(slider: &mut Rangeable<FakeHost>, path: &[f64]) {
    let Some((&first, rest)) = path.split_first() else {
        return;
    };
    let position = slider.host().track_point(first);
    slider.handle_event(SliderEvent::PointerDown {
        position,
        kind: PointerKind::Mouse,
    });
    for &fraction in rest {
        let position = slider.host().track_point(fraction);
        slider.handle_event(SliderEvent::PointerMove { position });
    }
    slider.handle_event(SliderEvent::PointerUp);
}

fn volume(document: &mut FakeDocument) -> Option<Rangeable<FakeHost>> {
    let config = SliderConfig::builder()
        .step(5.0)
        .tooltips(TooltipVisibility::OnInteraction)
        .observer(callbacks("volume"))
        .build();
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid volume config");
            return None;
        }
    };
    match Rangeable::attach_selector(document, "#volume", config) {
        Ok(slider) => slider,
        Err(err) => {
            error!(%err, "cannot attach volume slider");
            None
        }
    }
}

fn price(document: &mut FakeDocument) -> Option<Rangeable<FakeHost>> {
    let config = SliderConfig::builder()
        .mode(Mode::Double)
        .update_throttle(Duration::from_millis(30))
        .observer(callbacks("price"))
        .build()
        .ok()?;
    Rangeable::attach_selector(document, "#price", config).ok()?
}

fn main() {
    init_tracing();

    let mut document = FakeDocument::new();
    document.insert("#volume", FakeHost::new().with_attribute(Attribute::Value, "30"));
    document.insert(
        "#price",
        FakeHost::new()
            .with_form()
            .with_attribute(Attribute::Min, "100")
            .with_attribute(Attribute::Max, "500")
            .with_attribute(Attribute::Step, "10")
            .with_attribute(Attribute::Value, "150,400"),
    );

    if let Err(err) = Rangeable::attach_selector(&mut document, "#missing", SliderConfig::default()) {
        warn!(%err, "skipping slider");
    }

    let Some(mut volume) = volume(&mut document) else {
        return;
    };
    drag(&mut volume, &[0.31, 0.48, 0.72, 0.69]);
    volume.handle_event(SliderEvent::KeyDown {
        handle: 0,
        key: Key::ArrowRight,
    });
    info!(
        value = ?volume.value(),
        element = ?volume.host().attribute(Attribute::Value),
        notifications = ?volume.host().notifications(),
        "volume session done"
    );

    let Some(mut price) = price(&mut document) else {
        return;
    };
    drag(&mut price, &[0.9, 0.8, 0.45]);
    drag(&mut price, &[0.4, 0.41]);
    info!(
        value = ?price.value(),
        combined = ?price.host().tooltip(TooltipSlot::Combined),
        "price after drags"
    );

    let now = Instant::now();
    price.handle_event(SliderEvent::Resize { at: now });
    price.handle_event(SliderEvent::FormReset);
    info!(
        value = ?price.value(),
        element = ?price.host().attribute(Attribute::Value),
        "price after form reset"
    );

    price.disable();
    drag(&mut price, &[0.1]);
    info!(value = ?price.value(), "disabled price ignored the drag");

    price.destroy();
    volume.destroy();
    info!(mounted = volume.host().is_mounted(), "sliders destroyed");
}
