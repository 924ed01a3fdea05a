use super::*;
use crate::settings::{Settings, StyleSetting};

fn setting(fg: Option<&str>, bg: Option<&str>) -> StyleSetting {
    StyleSetting {
        fg: fg.map(str::to_string),
        bg: bg.map(str::to_string),
        disabled: false,
    }
}

#[test]
fn default_theme_styles_every_category_but_operators() {
    let theme = Theme::default();
    for category in Category::ALL {
        let expected = DEFAULT_SYNTAX_RGB_HEX[category as usize]
            .map(|hex| Style::fg(Color::from_rgb_hex(hex)));
        assert_eq!(theme.style(category), expected, "{:?}", category);
    }
    assert_eq!(theme.style(Category::Operator), None);
    assert_eq!(
        theme.style(Category::Keyword),
        Some(Style::fg(Color::Rgb(0x56, 0x9C, 0xD6)))
    );
}

#[test]
fn empty_theme_has_no_styles() {
    let theme = Theme::empty();
    assert!(Category::ALL.iter().all(|c| theme.style(*c).is_none()));
}

#[test]
fn set_and_clear_style() {
    let mut theme = Theme::empty();
    let style = Style::fg(Color::Indexed(1)).bg(Color::Indexed(0));
    theme.set_style(Category::Label, style);
    assert_eq!(theme.style(Category::Label), Some(style));

    theme.clear_style(Category::Label);
    assert_eq!(theme.style(Category::Label), None);
}

#[test]
fn settings_override_and_disable_categories() {
    let mut settings = Settings::default();
    settings.syntax.keyword = Some(setting(Some("#010203"), Some("black")));
    settings.syntax.operator = Some(setting(Some("white"), None));
    settings.syntax.comment = Some(StyleSetting {
        disabled: true,
        ..StyleSetting::default()
    });

    let theme = Theme::from_settings(&settings);

    assert_eq!(
        theme.style(Category::Keyword),
        Some(Style::fg(Color::Rgb(1, 2, 3)).bg(Color::Indexed(0)))
    );
    assert_eq!(
        theme.style(Category::Operator),
        Some(Style::fg(Color::Indexed(15)))
    );
    assert_eq!(theme.style(Category::Comment), None);
    assert_eq!(theme.style(Category::String), Theme::default().style(Category::String));
}

#[test]
fn invalid_colors_keep_the_previous_style() {
    let mut settings = Settings::default();
    settings.syntax.string = Some(setting(Some("#12"), Some("nope")));
    settings.syntax.operator = Some(setting(Some("not-a-color"), None));

    let theme = Theme::from_settings(&settings);

    assert_eq!(
        theme.style(Category::String),
        Theme::default().style(Category::String)
    );
    assert_eq!(theme.style(Category::Operator), None);
}

#[test]
fn reset_background_clears_it() {
    let mut settings = Settings::default();
    settings.syntax.number = Some(setting(None, Some("reset")));

    let theme = Theme::from_settings(&settings);

    let number = theme.style(Category::Number).expect("number style");
    assert_eq!(number.bg, None);
    assert_eq!(number.fg, Color::from_rgb_hex(0xB5CEA8));
}

#[test]
fn parse_color_accepts_hex_and_names() {
    assert_eq!(parse_color("#FFaa00"), Some(Color::Rgb(0xFF, 0xAA, 0x00)));
    assert_eq!(parse_color("  Blue "), Some(Color::Indexed(4)));
    assert_eq!(parse_color("grey"), Some(Color::Indexed(7)));
    assert_eq!(parse_color("reset"), Some(Color::Reset));
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("#GGGGGG"), None);
    assert_eq!(parse_color("#ÿÿÿ"), None);
    assert_eq!(parse_color("#+12345"), None);
    assert_eq!(parse_color("#1234567"), None);
}

#[test]
fn every_ansi_name_maps_to_its_index() {
    let names = [
        "black",
        "red",
        "green",
        "yellow",
        "blue",
        "magenta",
        "cyan",
        "gray",
        "dark_gray",
        "light_red",
        "light_green",
        "light_yellow",
        "light_blue",
        "light_magenta",
        "light_cyan",
        "white",
    ];
    for (idx, name) in names.iter().enumerate() {
        assert_eq!(parse_color(name), Some(Color::Indexed(idx as u8)), "{}", name);
    }
    assert_eq!(parse_color("DARK_GREY"), Some(Color::Indexed(8)));
    assert_eq!(parse_color("RESET"), Some(Color::Reset));
    assert_eq!(parse_color("purple"), None);
}

#[test]
fn color_to_hex_formats_rgb_only() {
    assert_eq!(
        color_to_hex(Color::Rgb(0x0A, 0xBC, 0xEF)).as_deref(),
        Some("#0ABCEF")
    );
    assert_eq!(color_to_hex(Color::Indexed(3)), None);
}
