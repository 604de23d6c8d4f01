use weather_widget_core::{Backdrop, WidgetView};

const CARD_WIDTH: usize = 60;

fn backdrop_banner(backdrop: Backdrop) -> String {
    let art = match backdrop {
        Backdrop::Day => "  \\ | /   ~   ~        ~      ~",
        Backdrop::Night => "   *   (   .    *    .   *    .",
    };
    format!("{art}\n  [{}]", backdrop.asset())
}

fn border() -> String {
    format!("+{}+", "-".repeat(CARD_WIDTH - 2))
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn row(out: &mut String, text: &str) {
    // Width is counted in chars; wide glyphs may push the right edge.
    let inner = CARD_WIDTH - 4;
    let len = text.chars().count();
    if len <= inner {
        out.push_str(&format!("| {text}{} |\n", " ".repeat(inner - len)));
    } else {
        out.push_str(&format!("| {text} |\n"));
    }
}

/// Loading line shown while a search is in flight.
pub fn status_line(view: &WidgetView) -> String {
    format!("[ {} ] {}", view.button_label, view.input.trim())
}

/// Paint the whole widget: backdrop banner, then the card.
pub fn render(view: &WidgetView) -> String {
    let mut out = String::new();

    line(&mut out, &backdrop_banner(view.backdrop));
    line(&mut out, &border());
    row(&mut out, view.title);
    row(&mut out, view.subtitle);
    line(&mut out, &border());

    if let Some(error) = &view.error {
        row(&mut out, &format!("! {error}"));
    }

    if let Some(card) = &view.card {
        row(&mut out, &format!("Temp:     {}", card.temperature));
        row(&mut out, &format!("Sky:      {}", card.weather));
        row(&mut out, &format!("Location: {}", card.location));
    }

    if view.error.is_some() || view.card.is_some() {
        line(&mut out, &border());
    }

    out
}
