//! App: component-based event loop for the terminal UI.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Commands to the session core flow out through `cmd_tx`.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use tune_proto::assistant::{FALLBACK_EMPTY, FALLBACK_NO_KEY, FALLBACK_UNREACHABLE};
use tune_proto::protocol::{Command, SessionState, ViewMode};
use tune_proto::selection::Direction as StepDirection;
use tune_proto::state::StateManager;

use crate::core::CoreEvent;
use crate::BroadcastMessage;
use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        category_pills::CategoryPills, hero_carousel::HeroCarousel, player_bar::PlayerBar,
        search_bar::SearchBar, sidebar::draw_sidebar, song_list::SongList, splash::Splash,
    },
    focus::FocusRing,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

const SIDEBAR_W: u16 = 24;
const CAROUSEL_H: u16 = 10;
const PILLS_H: u16 = 3;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    StateUpdated(SessionState),
}

/// Last-drawn pane rects, for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    search: Rect,
    carousel: Rect,
    pills: Rect,
    popular: Rect,
    recent: Rect,
    player: Rect,
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

pub struct App {
    state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    splash: Splash,
    search_bar: SearchBar,
    carousel: HeroCarousel,
    pills: CategoryPills,
    popular: SongList,
    recent: SongList,
    player: PlayerBar,

    focus: FocusRing,
    show_keys_bar: bool,
    pane_areas: PaneAreas,
    toast: ToastManager,

    // ── Session bookkeeping ───────────────────────────────────────────────────
    cmd_tx: mpsc::Sender<CoreEvent>,
    state_manager: Arc<StateManager>,

    /// Whether to quit on next iteration.
    should_quit: bool,
}

impl App {
    pub fn new(
        cmd_tx: mpsc::Sender<CoreEvent>,
        state_manager: Arc<StateManager>,
        initial: SessionState,
    ) -> Self {
        Self {
            state: AppState::new(initial),
            splash: Splash::new(),
            search_bar: SearchBar::new(),
            carousel: HeroCarousel::new(),
            pills: CategoryPills::new(),
            popular: SongList::popular(),
            recent: SongList::recent(),
            player: PlayerBar::new(),
            focus: FocusRing::new(vec![
                ComponentId::SearchBar,
                ComponentId::HeroCarousel,
                ComponentId::CategoryPills,
                ComponentId::PopularSongs,
                ComponentId::RecentSongs,
                ComponentId::PlayerBar,
            ]),
            show_keys_bar: true,
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
            cmd_tx,
            state_manager,
            should_quit: false,
        }
    }

    pub async fn run(
        mut self,
        mut broadcast_rx: broadcast::Receiver<BroadcastMessage>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls so the thread notices when the App (and its receiver) is gone.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(250)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        // ── Background task: broadcast receiver (SessionCore → AppMessage) ─────
        let bc_tx = tx.clone();
        let bc_state_manager = Arc::clone(&self.state_manager);
        tokio::spawn(async move {
            loop {
                match broadcast_rx.recv().await {
                    Ok(BroadcastMessage::StateUpdated) => {
                        let state = bc_state_manager.get_state().await;
                        if bc_tx.send(AppMessage::StateUpdated(state)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("broadcast receiver lagged by {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        drop(tx);

        // Toast expiry + spinner animation + component ticks.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        let result: anyhow::Result<()> = loop {
            if needs_redraw {
                if let Err(e) = terminal.draw(|f| self.draw(f)) {
                    break Err(e.into());
                }
            }
            needs_redraw = false;

            if self.should_quit {
                break Ok(());
            }

            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => {
                        let mut redraw = self.handle_message(msg).await;
                        while let Ok(next) = rx.try_recv() {
                            redraw |= self.handle_message(next).await;
                        }
                        needs_redraw = redraw;
                    }
                    None => break Ok(()),
                },

                _ = ui_tick.tick() => {
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.search_bar.tick(s));
                        all.extend(self.carousel.tick(s));
                        all.extend(self.pills.tick(s));
                        all.extend(self.popular.tick(s));
                        all.extend(self.recent.tick(s));
                        all.extend(self.player.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action).await;
                    }
                    // Redraw once more after the last toast expires.
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    needs_redraw = self.state.session.query.is_loading || had_toasts;
                }
            }
        };

        // ── Teardown ──────────────────────────────────────────────────────────
        let _ = self.cmd_tx.send(CoreEvent::Shutdown).await;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("UI closed");

        result
    }

    /// Returns whether a redraw is needed.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    for a in self.handle_key(key) {
                        self.dispatch(a).await;
                    }
                }
                Event::Mouse(mouse) => {
                    for a in self.handle_mouse(mouse) {
                        self.dispatch(a).await;
                    }
                }
                Event::Resize(w, h) => {
                    self.dispatch(Action::Resize(w, h)).await;
                }
                _ => return false,
            },
            AppMessage::StateUpdated(session) => self.on_state_updated(session),
        }
        true
    }

    fn on_state_updated(&mut self, new_state: SessionState) {
        // Broadcasts can be coalesced; never step backwards.
        if new_state.rev < self.state.session.rev {
            return;
        }
        let was_loading = self.state.session.query.is_loading;
        self.state.session = new_state;
        let query = &self.state.session.query;

        if query.is_loading && !was_loading {
            self.toast.spinner("Asking the AI DJ…");
        } else if !query.is_loading && was_loading {
            self.toast.dismiss_spinner();
            match query.last_result.as_deref() {
                Some(FALLBACK_NO_KEY) => self.toast.warning("no API key configured"),
                Some(FALLBACK_EMPTY) | Some(FALLBACK_UNREACHABLE) => {
                    self.toast.warning("the AI DJ is unavailable")
                }
                Some(_) => self.toast.success("recommendations ready"),
                None => {}
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        if self.state.session.view_mode == ViewMode::Splash {
            if key.code == KeyCode::Char('q') {
                return vec![Action::Quit];
            }
            return self.splash.handle_key(key);
        }

        // Tab / Shift-Tab always cycle focus (closing the search box first).
        match key.code {
            KeyCode::Tab => {
                if self.state.input_mode == InputMode::Search {
                    return vec![Action::CloseSearch, Action::FocusNext];
                }
                return vec![Action::FocusNext];
            }
            KeyCode::BackTab => {
                if self.state.input_mode == InputMode::Search {
                    return vec![Action::CloseSearch, Action::FocusPrev];
                }
                return vec![Action::FocusPrev];
            }
            _ => {}
        }

        if self.state.input_mode == InputMode::Search {
            return self.search_bar.handle_key(key, &self.state);
        }

        // Global keys (Normal mode only)
        let has_result = self.state.session.query.last_result.is_some();
        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char(' ') => return vec![Action::TogglePlay],
            KeyCode::Char('n') => return vec![Action::Next],
            KeyCode::Char('p') => return vec![Action::Prev],
            KeyCode::Char('e') => return vec![Action::ToggleExpandPlayer],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Char('/') => {
                return vec![Action::FocusPane(ComponentId::SearchBar), Action::OpenSearch]
            }
            KeyCode::Char('x') if has_result => return vec![Action::DismissResult],
            KeyCode::Char(c @ '1'..='6') => {
                let pos = c as usize - '1' as usize;
                if let Some(id) = self.focus.set_by_position(pos) {
                    return vec![Action::FocusPane(id)];
                }
                return vec![];
            }
            _ => {}
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::SearchBar) => self.search_bar.handle_key(key, s),
            Some(ComponentId::HeroCarousel) => self.carousel.handle_key(key, s),
            Some(ComponentId::CategoryPills) => self.pills.handle_key(key, s),
            Some(ComponentId::PopularSongs) => self.popular.handle_key(key, s),
            Some(ComponentId::RecentSongs) => self.recent.handle_key(key, s),
            Some(ComponentId::PlayerBar) => self.player.handle_key(key, s),
            None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.state.session.view_mode == ViewMode::Splash {
            return self.splash.handle_mouse(event);
        }
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas;
        let s = &self.state;

        let (id, mut actions) = if hit(areas.search, col, row) {
            (ComponentId::SearchBar, self.search_bar.handle_mouse(event, areas.search, s))
        } else if hit(areas.carousel, col, row) {
            (ComponentId::HeroCarousel, self.carousel.handle_mouse(event, areas.carousel, s))
        } else if hit(areas.pills, col, row) {
            (ComponentId::CategoryPills, self.pills.handle_mouse(event, areas.pills, s))
        } else if hit(areas.popular, col, row) {
            (ComponentId::PopularSongs, self.popular.handle_mouse(event, areas.popular, s))
        } else if hit(areas.recent, col, row) {
            (ComponentId::RecentSongs, self.recent.handle_mouse(event, areas.recent, s))
        } else if hit(areas.player, col, row) {
            (ComponentId::PlayerBar, self.player.handle_mouse(event, areas.player, s))
        } else {
            return vec![];
        };

        // Focus follows the click.
        if !self.focus.is_focused(id) && !actions.contains(&Action::FocusPane(id)) {
            actions.insert(0, Action::FocusPane(id));
        }
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Components see every action first (search box open/close, expand).
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.search_bar.on_action(&action, s));
            out.extend(self.carousel.on_action(&action, s));
            out.extend(self.pills.on_action(&action, s));
            out.extend(self.popular.on_action(&action, s));
            out.extend(self.recent.on_action(&action, s));
            out.extend(self.player.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Screen ────────────────────────────────────────────────────────
            Action::EnterMain => self.send_cmd(Command::EnterMain).await,

            // ── Playback / selection ──────────────────────────────────────────
            Action::SelectTrack(id) => self.send_cmd(Command::SelectTrack { id }).await,
            Action::Next => {
                self.send_cmd(Command::Advance {
                    direction: StepDirection::Next,
                })
                .await
            }
            Action::Prev => {
                self.send_cmd(Command::Advance {
                    direction: StepDirection::Previous,
                })
                .await
            }
            Action::TogglePlay => self.send_cmd(Command::TogglePlayPause).await,
            Action::SetCarouselIndex(index) => {
                self.send_cmd(Command::SetCarouselIndex { index }).await
            }
            Action::SetCategory(id) => self.send_cmd(Command::SetActiveCategory { id }).await,

            // ── Assistant ─────────────────────────────────────────────────────
            Action::SubmitQuery(text) => {
                if text.trim().is_empty() {
                    self.toast.info("type a mood first");
                }
                self.send_cmd(Command::SubmitQuery { text }).await;
            }
            Action::DismissResult => self.send_cmd(Command::DismissResult).await,

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.sync_input_mode();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.sync_input_mode();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.sync_input_mode();
            }
            Action::OpenSearch => {
                self.focus.set(ComponentId::SearchBar);
                self.state.input_mode = InputMode::Search;
            }
            Action::CloseSearch => self.state.input_mode = InputMode::Normal,

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,

            // Handled at component level / no-op here
            Action::ToggleExpandPlayer | Action::Resize(_, _) => {}
        }
    }

    async fn send_cmd(&self, cmd: Command) {
        if self.cmd_tx.send(CoreEvent::ClientCommand(cmd)).await.is_err() {
            warn!("session core is gone; command dropped");
        }
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.search_bar.is_editing() {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        if self.state.session.view_mode == ViewMode::Splash {
            self.splash.draw(frame, area);
            self.toast.draw(frame, area);
            return;
        }

        // ── Outer layout: body | player | (keys bar) ──────────────────────────
        let status_h = if self.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(self.player.desired_height()),
                Constraint::Length(status_h),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_W), Constraint::Min(0)])
            .split(outer[0]);
        draw_sidebar(frame, body[0], &self.state);

        let content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SearchBar::desired_height(&self.state)),
                Constraint::Length(CAROUSEL_H),
                Constraint::Length(PILLS_H),
                Constraint::Min(0),
            ])
            .split(body[1]);
        let lists = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content[3]);

        self.pane_areas = PaneAreas {
            search: content[0],
            carousel: content[1],
            pills: content[2],
            popular: lists[0],
            recent: lists[1],
            player: outer[1],
        };

        let s = &self.state;
        let f = &self.focus;
        self.carousel
            .draw(frame, content[1], f.is_focused(ComponentId::HeroCarousel), s);
        self.pills
            .draw(frame, content[2], f.is_focused(ComponentId::CategoryPills), s);
        self.popular
            .draw(frame, lists[0], f.is_focused(ComponentId::PopularSongs), s);
        self.recent
            .draw(frame, lists[1], f.is_focused(ComponentId::RecentSongs), s);
        self.player
            .draw(frame, outer[1], f.is_focused(ComponentId::PlayerBar), s);
        // Last so its cursor position wins.
        self.search_bar
            .draw(frame, content[0], f.is_focused(ComponentId::SearchBar), s);

        if self.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[2], s.input_mode, s.session.view_mode);
        }

        self.toast.draw(frame, area);
    }
}
