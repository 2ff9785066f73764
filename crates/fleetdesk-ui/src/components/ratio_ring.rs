use leptos::prelude::*;

/// SVG ring filled to `value` percent, with the figure in the middle.
///
/// Uses the stroke-dasharray technique: the filled circle draws exactly
/// `value`% of its circumference and hides the rest.
#[component]
pub fn RatioRing(value: f32, label: String, color: &'static str) -> impl IntoView {
    let SIZE: f32 = 120.0;
    let STROKE_WIDTH: f32 = 10.0;
    let RADIUS: f32 = (SIZE - STROKE_WIDTH) / 2.0;
    let CENTER: f32 = SIZE / 2.0;

    let circumference = 2.0 * std::f32::consts::PI * RADIUS;
    let clampedValue = value.clamp(0.0, 100.0);
    let filledLength = circumference * (clampedValue / 100.0);
    let fillDasharray = format!("{filledLength} {circumference}");

    view! {
        <div class="gauge-container">
            <svg
                width=format!("{SIZE}")
                height=format!("{SIZE}")
                viewBox=format!("0 0 {SIZE} {SIZE}")
                class="gauge-svg"
            >
                <circle
                    cx=format!("{CENTER}")
                    cy=format!("{CENTER}")
                    r=format!("{RADIUS}")
                    class="gauge-bg"
                    stroke-width=format!("{STROKE_WIDTH}")
                />
                // starts at 12 o'clock
                <circle
                    cx=format!("{CENTER}")
                    cy=format!("{CENTER}")
                    r=format!("{RADIUS}")
                    class="gauge-fill"
                    stroke=color
                    stroke-width=format!("{STROKE_WIDTH}")
                    stroke-dasharray=fillDasharray
                    transform=format!("rotate(-90 {CENTER} {CENTER})")
                />
                <text x=format!("{CENTER}") y=format!("{}", CENTER + 6.0) class="gauge-text gauge-value">
                    {format!("{clampedValue:.0}%")}
                </text>
            </svg>
            <span class="gauge-label">{label}</span>
        </div>
    }
}

pub fn ratio_color(value: f32) -> &'static str {
    if value >= 80.0 {
        "#22c55e"
    } else if value >= 50.0 {
        "#f59e0b"
    } else {
        "#ef4444"
    }
}
