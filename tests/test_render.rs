use space_invaders::compute::init_state;
use space_invaders::display::*;
use space_invaders::entities::*;
use space_invaders::input::{handle_key, Key, KeyInput};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Every glyph is 10 px wide so centring is easy to predict.
const GLYPH_W: i32 = 10;

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Rect(Rgb, i32, i32, i32, i32),
    Oval(Rgb, i32, i32, i32, i32),
    Text(Rgb, Font, String, i32, i32),
}

struct Recorder {
    color: Rgb,
    font: Font,
    ops: Vec<Op>,
}

impl Recorder {
    fn new() -> Self {
        Recorder {
            color: Rgb::WHITE,
            font: Font::HUD,
            ops: Vec::new(),
        }
    }

    fn rects(&self, color: Rgb) -> Vec<(i32, i32, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect(c, x, y, w, h) if *c == color => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    fn text(&self, needle: &str) -> Option<(Font, i32, i32)> {
        self.ops.iter().find_map(|op| match op {
            Op::Text(_, font, s, x, y) if s == needle => Some((*font, *x, *y)),
            _ => None,
        })
    }

    fn has_text_starting(&self, prefix: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, s, _, _) if s.starts_with(prefix)))
    }
}

impl Canvas for Recorder {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::Rect(self.color, x, y, w, h));
    }

    fn fill_oval(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::Oval(self.color, x, y, w, h));
    }

    fn string_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * GLYPH_W
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        self.ops
            .push(Op::Text(self.color, self.font, text.to_string(), x, y));
    }
}

fn idle() -> GameState {
    init_state(&mut StdRng::seed_from_u64(11), BoundsRule::FullGrid)
}

fn draw(state: &GameState) -> Recorder {
    let mut rec = Recorder::new();
    render(&mut rec, state);
    rec
}

// ── Title screen ──────────────────────────────────────────────────────────────

#[test]
fn idle_shows_title_over_stars_only() {
    let rec = draw(&idle());

    assert_eq!(rec.ops[0], Op::Rect(Rgb::BLACK, 0, 0, WIDTH, HEIGHT));
    let stars = rec.rects(Rgb::WHITE);
    assert_eq!(stars.len(), STAR_COUNT);
    assert!(stars.iter().all(|&(_, _, w, h)| w == 2 && h == 2));

    // "Space Invaders" is 14 glyphs → (800 - 140) / 2
    assert_eq!(rec.text(TITLE_TEXT), Some((Font::TITLE, 330, 260)));
    assert_eq!(rec.text(START_PROMPT), Some((Font::SUBTITLE, 300, 310)));

    assert!(rec.rects(Rgb::RED).is_empty());
    assert!(rec.rects(Rgb::GREEN).is_empty());
    assert!(!rec.has_text_starting("Score"));
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn playing_draws_hud_and_sprites() {
    let mut s = handle_key(&idle(), KeyInput::press(Key::Enter));
    s.projectile = Projectile {
        active: true,
        x: 100,
        y: 300,
    };
    s.explosions.spawn(400, 70);
    let rec = draw(&s);

    assert_eq!(rec.text("Score: 0"), Some((Font::HUD, 20, 30)));
    assert_eq!(rec.text("Lives: 3"), Some((Font::HUD, 660, 30)));
    assert_eq!(rec.text("Level: 0"), Some((Font::HUD, 360, 30)));

    assert_eq!(rec.rects(Rgb::GREEN), vec![(370, 520, 60, 20)]);
    assert_eq!(rec.rects(Rgb::YELLOW), vec![(100, 300, 4, 12)]);
    assert_eq!(
        rec.rects(Rgb::RED),
        vec![(220, 60, 50, 20), (290, 60, 50, 20), (360, 60, 50, 20), (430, 60, 50, 20)]
    );
    assert!(rec.ops.contains(&Op::Oval(Rgb::ORANGE, 395, 65, 10, 10)));
    assert!(rec.text(TITLE_TEXT).is_none());
    assert!(rec.text(LOSE_TEXT).is_none());
}

#[test]
fn enemies_follow_the_group_offset() {
    let mut s = handle_key(&idle(), KeyInput::press(Key::Enter));
    s.motion.offset_x = -15;
    s.grid.kill(0, 3);
    let rec = draw(&s);
    assert_eq!(
        rec.rects(Rgb::RED),
        vec![(205, 60, 50, 20), (345, 60, 50, 20), (415, 60, 50, 20)]
    );
}

#[test]
fn layers_are_back_to_front() {
    let mut s = handle_key(&idle(), KeyInput::press(Key::Enter));
    s.explosions.spawn(10, 10);
    let rec = draw(&s);
    let pos = |pred: &dyn Fn(&Op) -> bool| rec.ops.iter().position(pred).unwrap();
    let hud = pos(&|op| matches!(op, Op::Text(..)));
    let player = pos(&|op| matches!(op, Op::Rect(c, ..) if *c == Rgb::GREEN));
    let enemy = pos(&|op| matches!(op, Op::Rect(c, ..) if *c == Rgb::RED));
    let boom = pos(&|op| matches!(op, Op::Oval(..)));
    assert!(hud < player && player < enemy && enemy < boom);
}

// ── End screens ───────────────────────────────────────────────────────────────

#[test]
fn ended_shows_outcome_and_restart_hint() {
    let mut s = handle_key(&idle(), KeyInput::press(Key::Enter));
    s.phase = GamePhase::Ended { won: false };
    s.lives = 0;
    let rec = draw(&s);
    assert_eq!(rec.text(LOSE_TEXT), Some((Font::TITLE, 355, 300)));
    assert_eq!(rec.text(RESTART_PROMPT), Some((Font::SUBTITLE, 275, 340)));
    assert_eq!(rec.text("Lives: 0"), Some((Font::HUD, 660, 30)));
    assert!(rec.text(WIN_TEXT).is_none());

    s.phase = GamePhase::Ended { won: true };
    let rec = draw(&s);
    assert_eq!(rec.text(WIN_TEXT), Some((Font::TITLE, 360, 300)));
    assert!(rec.text(LOSE_TEXT).is_none());
}
