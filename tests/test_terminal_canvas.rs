use space_invaders::compute::init_state;
use space_invaders::display::terminal::{TerminalCanvas, MIN_COLS, MIN_ROWS};
use space_invaders::display::{render, Canvas, Font, Rgb};
use space_invaders::entities::*;
use space_invaders::input::{handle_key, Key, KeyInput};
use space_invaders::GameError;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// 80×30 cells → 80×60 dots of 10×10 px each.
fn canvas() -> TerminalCanvas {
    TerminalCanvas::new(80, 30).unwrap()
}

#[test]
fn rejects_tiny_terminals() {
    let err = TerminalCanvas::new(MIN_COLS - 1, MIN_ROWS).err().unwrap();
    assert!(matches!(err, GameError::TerminalTooSmall { cols: 39, .. }));

    let mut c = canvas();
    assert!(c.resize(20, 10).is_err());
    assert_eq!(c.size(), (80, 30));
    c.resize(100, 40).unwrap();
    assert_eq!(c.size(), (100, 40));
}

#[test]
fn small_rect_covers_its_dot() {
    let mut c = canvas();
    c.set_color(Rgb::WHITE);
    c.fill_rect(100, 100, 2, 2);
    assert_eq!(c.dot(10, 10), Rgb::WHITE);
    assert_eq!(c.dot(11, 10), Rgb::BLACK);
    assert_eq!(c.dot(10, 11), Rgb::BLACK);
}

#[test]
fn rect_covers_every_touched_dot_and_clips() {
    let mut c = canvas();
    c.set_color(Rgb::RED);
    c.fill_rect(215, 55, 50, 20);
    // x 215..265 → dots 21..=26, y 55..75 → dots 5..=7
    for dx in 21..=26 {
        for dy in 5..=7 {
            assert_eq!(c.dot(dx, dy), Rgb::RED, "dot ({dx}, {dy})");
        }
    }
    assert_eq!(c.dot(20, 6), Rgb::BLACK);
    assert_eq!(c.dot(27, 6), Rgb::BLACK);

    // Partly off-screen on the left and bottom
    c.set_color(Rgb::GREEN);
    c.fill_rect(-30, 590, 50, 40);
    assert_eq!(c.dot(0, 59), Rgb::GREEN);
    assert_eq!(c.dot(1, 59), Rgb::GREEN);
    assert_eq!(c.dot(2, 59), Rgb::BLACK);
}

#[test]
fn oval_fills_center_not_corners() {
    let mut c = canvas();
    c.set_color(Rgb::ORANGE);
    c.fill_oval(300, 300, 60, 60);
    assert_eq!(c.dot(33, 33), Rgb::ORANGE);
    assert_eq!(c.dot(30, 30), Rgb::BLACK);
    assert_eq!(c.dot(35, 35), Rgb::BLACK);
}

#[test]
fn tiny_oval_still_marks_one_dot() {
    let mut c = canvas();
    c.set_color(Rgb::ORANGE);
    c.fill_oval(401, 401, 2, 2);
    assert_eq!(c.dot(40, 40), Rgb::ORANGE);
}

#[test]
fn text_lands_on_the_baseline_row() {
    let mut c = canvas();
    c.set_color(Rgb::WHITE);
    c.set_font(Font::HUD);
    c.draw_string("Score: 0", 20, 30);
    assert_eq!(&c.text_row(1)[2..10], "Score: 0");
    assert_eq!(c.glyph(2, 1), Some('S'));
    assert_eq!(c.glyph(1, 1), None);
}

#[test]
fn string_width_matches_cell_pitch() {
    let c = canvas();
    assert_eq!(c.string_width("GAME OVER"), 90);
    assert_eq!(c.string_width(""), 0);
}

#[test]
fn present_writes_frame_and_clears_text() {
    let mut c = canvas();
    c.draw_string("hello", 0, 300);
    let mut out: Vec<u8> = Vec::new();
    c.present(&mut out).unwrap();

    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("hello"));
    assert!(written.contains('▀'));
    assert!(c.text_row(14).trim().is_empty());
}

#[test]
fn renders_a_playing_frame() {
    let s = init_state(&mut StdRng::seed_from_u64(5), BoundsRule::FullGrid);
    let s = handle_key(&s, KeyInput::press(Key::Enter));
    let mut c = canvas();
    render(&mut c, &s);

    // Player at (370, 520) and the first tutorial enemy at (220, 60)
    assert_eq!(c.dot(40, 53), Rgb::GREEN);
    assert_eq!(c.dot(24, 7), Rgb::RED);
    assert!(c.text_row(1).contains("Score: 0"));
    assert!(c.text_row(1).contains("Lives: 3"));
}
