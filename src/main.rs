use std::collections::VecDeque;

use nannou::color::{
    BLACK, DARKBLUE, DARKGREEN, DARKRED, DIMGRAY, GOLD, LIGHTGREEN, ORANGE, RED, SALMON, WHITE,
};
use nannou::event::{Key, MouseButton};
use nannou::geom::Rect;
use snakes_ladders::snakes::{
    Board, Cell, Player, RedirectKind, Severity, TurnEngine, TurnEvent, grid_position,
};

// Replay pacing in frames at the default 60 fps: one cell per ~150ms,
// a ~500ms pause on a snake or ladder notice, and the bot rolls ~1.5s
// after its turn starts.
const STEP_FRAMES: u32 = 9;
const REDIRECT_FRAMES: u32 = 30;
const BOT_DELAY_FRAMES: u32 = 90;

fn main() {
    env_logger::init();

    nannou::app(model).update(update).run();
}

struct Model {
    engine: TurnEngine,
    /// Token cells as currently drawn. They trail the engine's
    /// committed positions while a replay is playing out.
    shown: [Cell; 2],
    die_value: Option<u8>,
    message: Option<(String, Severity)>,
    turn_label: &'static str,
    state: State,
}

enum State {
    Idle,
    BotWait(u32),
    Replay {
        pending: VecDeque<TurnEvent>,
        cooldown: u32,
    },
}

fn model(app: &nannou::App) -> Model {
    app.new_window()
        .size(1000, 720)
        .title("Snakes and Ladders")
        .view(view)
        .mouse_pressed(mouse_pressed)
        .key_pressed(key_pressed)
        .build()
        .unwrap();

    let board = Board::standard().expect("standard board configuration is valid");
    let engine = TurnEngine::new(board);

    Model {
        shown: [engine.position(Player::User), engine.position(Player::Bot)],
        turn_label: engine.active_player().label(),
        engine,
        die_value: None,
        message: None,
        state: State::Idle,
    }
}

fn update(_app: &nannou::App, model: &mut Model, _update: nannou::event::Update) {
    match model.state {
        State::Idle => (),
        State::BotWait(0) => start_turn(model),
        State::BotWait(n) => model.state = State::BotWait(n - 1),
        State::Replay { .. } => step_replay(model),
    }
}

fn mouse_pressed(_app: &nannou::App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        try_user_roll(model);
    }
}

fn key_pressed(_app: &nannou::App, model: &mut Model, key: Key) {
    if key == Key::Space {
        try_user_roll(model);
    }
}

fn try_user_roll(model: &mut Model) {
    // clicks while a replay or the bot delay is running fall through
    // to the engine's own guard and stay no-ops
    if matches!(model.state, State::Idle) && model.engine.input_enabled() {
        start_turn(model);
    }
}

fn start_turn(model: &mut Model) {
    let events = model.engine.take_turn();
    model.state = if events.is_empty() {
        // guard rejected the trigger, e.g. a bot timer that fired
        // after the game finished
        State::Idle
    } else {
        model.message = None;
        State::Replay {
            pending: events.into(),
            cooldown: 0,
        }
    };
}

/// Consumes the next pending notice once its predecessor's cooldown
/// has elapsed. Purely cosmetic: the engine committed the final state
/// when the turn was taken.
fn step_replay(model: &mut Model) {
    let event = {
        let State::Replay { pending, cooldown } = &mut model.state else {
            return;
        };
        if *cooldown > 0 {
            *cooldown -= 1;
            return;
        }
        pending.pop_front()
    };

    let Some(event) = event else {
        model.engine.finish_replay();
        model.state = if model.engine.bot_turn_pending() {
            State::BotWait(BOT_DELAY_FRAMES)
        } else {
            State::Idle
        };
        return;
    };

    if let Some((player, cell)) = event.position() {
        model.shown[token_index(player)] = cell;
    }
    if let Some(message) = event.message() {
        model.message = Some(message);
    }

    let cooldown = match event {
        TurnEvent::Rolled { value, .. } => {
            model.die_value = Some(value);
            0
        }
        TurnEvent::Moved { .. } => STEP_FRAMES,
        TurnEvent::SlidDown { .. } | TurnEvent::ClimbedUp { .. } => REDIRECT_FRAMES,
        TurnEvent::ExactRollNeeded { .. } => REDIRECT_FRAMES,
        TurnEvent::NextTurn { player } => {
            model.turn_label = player.label();
            0
        }
        TurnEvent::Landed { .. } | TurnEvent::Won { .. } => 0,
    };
    if let State::Replay { cooldown: frames, .. } = &mut model.state {
        *frames = cooldown;
    }
}

fn token_index(player: Player) -> usize {
    match player {
        Player::User => 0,
        Player::Bot => 1,
    }
}

fn view(app: &nannou::App, model: &Model, frame: nannou::frame::Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let (width, height) = (window_rect.w(), window_rect.h());
    let (center_x, center_y) = (window_rect.x(), window_rect.y());

    let panel_width = 320.0;
    let panel_rect = Rect::from_w_h(panel_width, height)
        .shift_x(width / 2.0 - panel_width / 2.0)
        .shift_y(center_y);
    let board_rect = Rect::from_w_h(width - panel_width, height)
        .shift_x(center_x - panel_width / 2.0)
        .shift_y(center_y);

    let tile_width = board_rect.w() / Board::SIZE as f32;
    let tile_height = board_rect.h() / Board::SIZE as f32;

    // Draw board
    for cell in 1..=Board::CELLS {
        let (x, y) = cell_center(&board_rect, cell);
        draw.rect()
            .x_y(x, y)
            .w_h(tile_width - 2.0, tile_height - 2.0)
            .color(cell_color(model.engine.board(), cell));
        draw.text(&cell.to_string())
            .x_y(x - tile_width / 2.0 + 16.0, y + tile_height / 2.0 - 12.0)
            .font_size(12)
            .color(WHITE);
    }

    // Draw tokens, offset so both stay visible on a shared cell
    let (user_x, user_y) = cell_center(&board_rect, model.shown[token_index(Player::User)]);
    draw.ellipse()
        .x_y(user_x - tile_width * 0.18, user_y - tile_height * 0.15)
        .w_h(tile_width * 0.42, tile_width * 0.42)
        .color(WHITE);
    draw.text("U")
        .x_y(user_x - tile_width * 0.18, user_y - tile_height * 0.15)
        .font_size(tile_width as u32 / 4)
        .color(BLACK);

    let (bot_x, bot_y) = cell_center(&board_rect, model.shown[token_index(Player::Bot)]);
    draw.ellipse()
        .x_y(bot_x + tile_width * 0.18, bot_y + tile_height * 0.15)
        .w_h(tile_width * 0.42, tile_width * 0.42)
        .color(RED);
    draw.text("B")
        .x_y(bot_x + tile_width * 0.18, bot_y + tile_height * 0.15)
        .font_size(tile_width as u32 / 4)
        .color(WHITE);

    // Draw panel
    let mut y = panel_rect.top() - 50.0;
    let x = panel_rect.x();
    draw.text("Snakes and Ladders")
        .x_y(x, y)
        .w(panel_width - 20.0)
        .font_size(26)
        .color(WHITE);

    y -= 40.0;

    draw.text(&format!("Turn: {}", model.turn_label))
        .x_y(x, y)
        .w(panel_width - 20.0)
        .font_size(16)
        .color(WHITE);

    y -= 30.0;

    draw.text(&format!(
        "User position: {}",
        model.shown[token_index(Player::User)]
    ))
    .x_y(x, y)
    .w(panel_width - 20.0)
    .font_size(16)
    .color(WHITE);

    y -= 30.0;

    draw.text(&format!(
        "Bot position: {}",
        model.shown[token_index(Player::Bot)]
    ))
    .x_y(x, y)
    .w(panel_width - 20.0)
    .font_size(16)
    .color(WHITE);

    y -= 30.0;

    let die_text = match model.die_value {
        Some(value) => format!("Die: {}", value),
        None => "Die: -".to_string(),
    };
    draw.text(&die_text)
        .x_y(x, y)
        .w(panel_width - 20.0)
        .font_size(16)
        .color(WHITE);

    y -= 50.0;

    if let Some((text, severity)) = &model.message {
        draw.text(text)
            .x_y(x, y)
            .w(panel_width - 20.0)
            .font_size(18)
            .color(severity_color(*severity));
    }

    y -= 60.0;

    let hint_enabled = matches!(model.state, State::Idle) && model.engine.input_enabled();
    draw.text("Click or press Space to roll")
        .x_y(x, y)
        .w(panel_width - 20.0)
        .font_size(14)
        .color(if hint_enabled { WHITE } else { DIMGRAY });

    draw.to_frame(app, &frame).unwrap();
}

fn cell_center(board_rect: &Rect, cell: Cell) -> (f32, f32) {
    let tile_width = board_rect.w() / Board::SIZE as f32;
    let tile_height = board_rect.h() / Board::SIZE as f32;
    let (row, col) = grid_position(cell);
    let x = board_rect.left() + col as f32 * tile_width + tile_width / 2.0;
    let y = board_rect.bottom() + row as f32 * tile_height + tile_height / 2.0;
    (x, y)
}

fn cell_color(board: &Board, cell: Cell) -> nannou::color::Srgb<u8> {
    if let Some(redirect) = board.redirect_for(cell) {
        return match redirect.kind {
            RedirectKind::Snake => DARKRED,
            RedirectKind::Ladder => DARKGREEN,
        };
    }
    if let Some((_, redirect)) = board.redirects().find(|(_, redirect)| redirect.to == cell) {
        return match redirect.kind {
            RedirectKind::Snake => SALMON,
            RedirectKind::Ladder => LIGHTGREEN,
        };
    }
    let (row, col) = grid_position(cell);
    if (row + col) % 2 == 0 { DARKBLUE } else { BLACK }
}

fn severity_color(severity: Severity) -> nannou::color::Srgb<u8> {
    match severity {
        Severity::Neutral => WHITE,
        Severity::Warning => ORANGE,
        Severity::Snake => SALMON,
        Severity::Ladder => LIGHTGREEN,
        Severity::Win => GOLD,
    }
}
