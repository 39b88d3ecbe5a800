//! Kanban board interface.
//!
//! Three fixed columns (To Do, In Progress, Done) rendered from the client
//! mirror. Keys and mouse gestures become [`Intent`]s, queued to a single
//! worker task on the tokio runtime. The worker runs them one at a time in
//! the order they were sent and answers over a channel that the event loop
//! drains between input polls, so only the loop ever touches the mirror.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::client::{ClientResult, TaskApi};
use crate::db::format_status;
use crate::fields::Status;
use crate::state::{Intent, IntentKind, Mirror, Mutation};
use crate::task::Task;
use crate::tui::{
    colors::{column_color, text_on, DARK_PURPLE, DARK_RED},
    drag::{DragMachine, DragOutcome, Point},
    enums::BoardMode,
    task_form::{TaskForm, TITLE_GLOBAL_ORDER},
};

/// Height of one rendered card, borders included.
const CARD_HEIGHT: u16 = 4;

/// An intent waiting for the worker, and the card to select once applied.
struct Request {
    intent: Intent,
    follow: Option<u64>,
}

/// Result of one intent, delivered back to the event loop.
struct Outcome {
    kind: IntentKind,
    follow: Option<u64>,
    result: ClientResult<Mutation>,
}

/// Execute requests strictly in arrival order. Stops when the board drops
/// its sender or stops listening for outcomes.
async fn run_requests(
    api: Arc<dyn TaskApi>,
    mut requests: UnboundedReceiver<Request>,
    outcomes: UnboundedSender<Outcome>,
) {
    while let Some(Request { intent, follow }) = requests.recv().await {
        let kind = intent.kind();
        let result = intent.execute(api.as_ref()).await;
        if outcomes.send(Outcome { kind, follow, result }).is_err() {
            break;
        }
    }
    tracing::debug!("request worker stopped");
}

/// Main board application state
pub struct BoardApp {
    request_tx: UnboundedSender<Request>,
    outcome_rx: UnboundedReceiver<Outcome>,
    in_flight: usize,
    mirror: Mirror,
    mode: BoardMode,
    drag: DragMachine,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    status_message: String,
    show_task_detail: bool,

    // Task ids per column, rebuilt from the mirror
    columns: [Vec<u64>; 3],
    // Screen geometry from the last frame, for mouse hit testing
    column_areas: [Rect; 3],
    card_areas: Vec<(Rect, u64)>,
}

impl BoardApp {
    /// Create a board and request the initial task list.
    pub fn new(api: Arc<dyn TaskApi>, runtime: Handle) -> Self {
        let (request_tx, request_rx) = unbounded_channel();
        let (outcome_tx, outcome_rx) = unbounded_channel();
        runtime.spawn(run_requests(api, request_rx, outcome_tx));

        let mut app = BoardApp {
            request_tx,
            outcome_rx,
            in_flight: 0,
            mirror: Mirror::default(),
            mode: BoardMode::Normal,
            drag: DragMachine::default(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            status_message: String::new(),
            show_task_detail: false,
            columns: Default::default(),
            column_areas: [Rect::default(); 3],
            card_areas: Vec::new(),
        };
        app.dispatch(Intent::Load);
        app
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    /// Queue an intent for the service without blocking the event loop.
    fn dispatch(&mut self, intent: Intent) {
        self.dispatch_following(intent, None);
    }

    /// Like `dispatch`, but select `follow` once the answer is applied.
    fn dispatch_following(&mut self, intent: Intent, follow: Option<u64>) {
        tracing::debug!(?intent, "queueing");
        let kind = intent.kind();
        if self.request_tx.send(Request { intent, follow }).is_err() {
            tracing::error!(intent = kind.label(), "request worker is gone");
            self.set_status_message(format!("Failed to {}: request worker stopped", kind.label()));
            return;
        }
        self.in_flight += 1;
    }

    /// Apply every outcome that has arrived since the last frame.
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome.result {
            Ok(mutation) => {
                let message = match (outcome.kind, &mutation) {
                    (_, Mutation::Loaded(tasks)) => format!("Loaded {} tasks", tasks.len()),
                    (_, Mutation::Added(task)) => format!("Added #{} {}", task.id, task.title),
                    (IntentKind::Move, Mutation::Replaced(task)) => {
                        format!("Moved #{} to {}", task.id, format_status(task.status))
                    }
                    (_, Mutation::Replaced(task)) => format!("Saved #{}", task.id),
                    (_, Mutation::Removed(id)) => format!("Deleted #{}", id),
                };
                self.mirror.apply(mutation);
                self.update_columns();
                if let Some(id) = outcome.follow {
                    self.select_task(id);
                }
                self.set_status_message(message);
            }
            Err(err) => {
                let label = outcome.kind.label();
                tracing::warn!(intent = label, error = %err, "request failed, mirror unchanged");
                self.set_status_message(format!("Failed to {}: {}", label, err));
            }
        }
    }

    /// Rebuild the column lists from the mirror.
    fn update_columns(&mut self) {
        self.columns = self.mirror.columns();
        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= self.columns.len() {
            self.selected_column = 0;
        }
        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    fn select_task(&mut self, id: u64) {
        for (column, ids) in self.columns.iter().enumerate() {
            if let Some(card) = ids.iter().position(|&t| t == id) {
                self.selected_column = column;
                self.selected_card = card;
                return;
            }
        }
    }

    fn selected_task_id(&self) -> Option<u64> {
        self.columns[self.selected_column].get(self.selected_card).copied()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.mirror.get(id))
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Ask the service to move `id` into `target`, unless it is already there.
    fn request_move(&mut self, id: u64, target: Status) {
        match self.mirror.move_intent(id, target) {
            Some(intent) => self.dispatch_following(intent, Some(id)),
            None => tracing::trace!(id, "drop on current column ignored"),
        }
    }

    /// Move the selected card one column left or right.
    fn move_selected(&mut self, right: bool) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, status) = (task.id, task.status);
        let target = if right { status.next() } else { status.prev() };
        if let Some(target) = target {
            self.request_move(id, target);
        }
    }

    /// Handle one terminal event. Returns true when the board should exit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match std::mem::replace(&mut self.mode, BoardMode::Normal) {
            BoardMode::Normal => return self.handle_normal_key(key),
            BoardMode::Adding(form) => self.handle_form_key(key, form, None),
            BoardMode::Editing { id, form } => self.handle_form_key(key, form, Some(id)),
            BoardMode::ConfirmDelete(id) => self.handle_confirm_key(key, id),
        }
        false
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        self.clear_status_message();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                if self.drag.dragging().is_some() {
                    self.drag.cancel();
                } else if self.show_task_detail {
                    self.show_task_detail = false;
                } else {
                    return true;
                }
            }

            KeyCode::Enter => {
                self.show_task_detail = !self.show_task_detail && self.selected_task_id().is_some();
            }

            // Card movement between columns (check first, before regular navigation)
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_selected(false),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_selected(true),

            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < self.columns.len() - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let column_len = self.columns[self.selected_column].len();
                if column_len > 0 && self.selected_card < column_len - 1 {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('a') => {
                self.show_task_detail = false;
                self.mode = BoardMode::Adding(TaskForm::new());
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    let (id, form) = (task.id, TaskForm::from_task(task));
                    self.show_task_detail = false;
                    self.mode = BoardMode::Editing { id, form };
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    self.show_task_detail = false;
                    self.mode = BoardMode::ConfirmDelete(id);
                }
            }
            KeyCode::Char('r') => self.dispatch(Intent::Load),
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.set_status_message(
                    "Help: a: Add | e: Edit | x: Delete | Ctrl+←/→: Move | drag card: Move | Enter: Details | r: Reload | q: Quit"
                        .to_string(),
                );
            }
            _ => {}
        }
        false
    }

    /// Keys while the add/edit form is open. `editing` is the card being edited.
    fn handle_form_key(&mut self, key: KeyEvent, mut form: TaskForm, editing: Option<u64>) {
        match key.code {
            KeyCode::Esc => {
                self.set_status_message("Cancelled".to_string());
                return;
            }
            KeyCode::Enter => {
                let (title, description) = (form.title.value.clone(), form.description.value.clone());
                match editing {
                    Some(id) => {
                        self.dispatch_following(Intent::Edit { id, title, description }, Some(id));
                        return;
                    }
                    None => match Intent::add(&title, &description) {
                        Some(intent) => {
                            self.dispatch(intent);
                            return;
                        }
                        None => {
                            self.set_status_message("Title is required".to_string());
                            form.current_field = TITLE_GLOBAL_ORDER;
                            form.update_active_field();
                        }
                    },
                }
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Delete => form.handle_delete(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
        self.mode = match editing {
            Some(id) => BoardMode::Editing { id, form },
            None => BoardMode::Adding(form),
        };
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, id: u64) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.dispatch(Intent::Remove { id }),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status_message("Delete cancelled".to_string());
            }
            _ => self.mode = BoardMode::ConfirmDelete(id),
        }
    }

    /// Mouse press/drag/release drive the drag machine; a drop becomes a move.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.mode.is_normal() {
            return;
        }
        let at = Point::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = card_at(&self.card_areas, at) {
                    self.select_task(id);
                    self.drag.pointer_down(id, at);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag.pointer_move(at),
            MouseEventKind::Up(MouseButton::Left) => {
                let target = column_at(&self.column_areas, at);
                match self.drag.pointer_up(target) {
                    DragOutcome::Click { task_id } => self.select_task(task_id),
                    DragOutcome::Drop { task_id, target } => self.request_move(task_id, target),
                    DragOutcome::Cancelled => {}
                }
            }
            _ => {}
        }
    }

    /// Render the kanban board
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if let Some((id, at)) = self.drag.dragging() {
            self.render_drag_ghost(f, id, at);
        }
        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
        match &self.mode {
            BoardMode::Normal => {}
            BoardMode::Adding(form) => render_form(f, "Add New Task", form),
            BoardMode::Editing { id, form } => render_form(f, &format!("Edit Task #{}", id), form),
            BoardMode::ConfirmDelete(id) => self.render_confirm(f, *id),
        }
    }

    /// Render the header
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header_text = vec![Line::from(vec![
            Span::styled("KANBAN BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} tasks", self.mirror.len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        self.card_areas.clear();
        for (i, status) in Status::ALL.into_iter().enumerate() {
            self.column_areas[i] = columns_layout[i];
            self.render_column(f, columns_layout[i], status);
        }
    }

    /// Render a single column with its live count
    fn render_column(&mut self, f: &mut Frame, area: Rect, status: Status) {
        let column_index = status.column();
        let is_selected = column_index == self.selected_column;
        let color = column_color(status);
        let drop_target = self
            .drag
            .dragging()
            .is_some_and(|(_, at)| contains(area, at));

        let border_style = if is_selected || drop_target {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let count = self.columns[column_index].len();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", status.title(), count))
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = self.columns[column_index].clone();
        if cards.is_empty() {
            return;
        }

        let visible_cards = (inner.height / CARD_HEIGHT) as usize;

        // Keep the selected card inside the visible window
        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            if self.selected_card < start_visible {
                self.selected_card
            } else if visible_cards > 0 && self.selected_card >= start_visible + visible_cards {
                self.selected_card + 1 - visible_cards
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index].min(cards.len() - 1)
        };
        self.column_scroll_offsets[column_index] = scroll_offset;

        let mut rendered_cards = 0;
        for (card_index, &task_id) in cards.iter().enumerate().skip(scroll_offset).take(visible_cards) {
            let Some(task) = self.mirror.get(task_id) else {
                continue;
            };
            let card_area = Rect {
                x: inner.x,
                y: inner.y + (rendered_cards as u16) * CARD_HEIGHT,
                width: inner.width,
                height: CARD_HEIGHT,
            };
            let is_this_card_selected = is_selected && card_index == self.selected_card;
            render_card(f, card_area, task, color, is_this_card_selected);
            self.card_areas.push((card_area, task_id));
            rendered_cards += 1;
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{} above", scroll_offset))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = cards.len() - scroll_offset - rendered_cards;
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    /// Small floating card under the pointer while dragging
    fn render_drag_ghost(&self, f: &mut Frame, id: u64, at: Point) {
        let Some(task) = self.mirror.get(id) else {
            return;
        };
        let screen = f.area();
        let width = 24u16.min(screen.width);
        let height = 3u16.min(screen.height);
        let x = at.x.min(screen.width.saturating_sub(width));
        let y = at.y.min(screen.height.saturating_sub(height));
        let ghost = Rect::new(x, y, width, height);

        f.render_widget(Clear, ghost);
        f.render_widget(
            Paragraph::new(task.title.clone())
                .block(Block::default().borders(Borders::ALL).title(format!("#{}", task.id)))
                .style(Style::default().bg(DARK_PURPLE).fg(Color::White)),
            ghost,
        );
    }

    /// Render the status bar
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let pending = if self.in_flight > 0 {
            format!(" [syncing {}]", self.in_flight)
        } else {
            String::new()
        };
        let status_text = if !self.status_message.is_empty() {
            format!("{}{}", self.status_message, pending)
        } else {
            let [todo, doing, done] = self.mirror.counts();
            format!(
                "To Do: {} | In Progress: {} | Done: {}{} | a: Add | e: Edit | x: Delete | drag/Ctrl+←→: Move | h: Help",
                todo, doing, done, pending
            )
        };

        let color = if self.status_message.starts_with("Failed") {
            DARK_RED
        } else {
            column_color(Status::from_column(self.selected_column).unwrap_or_default())
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(color).fg(text_on(color)))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Render the task detail popup
    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let popup_area = centered(f.area(), 60, 60);
        f.render_widget(Clear, popup_area);

        let detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Status:   {}", format_status(task.status))),
            Line::from(format!("Created:  {}", task.created_at.format("%Y-%m-%d %H:%M UTC"))),
            Line::from(format!("Updated:  {}", task.updated_at.format("%Y-%m-%d %H:%M UTC"))),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-" } else { task.description.as_str() }),
        ];

        let color = column_color(task.status);
        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        f.render_widget(
            Paragraph::new(detail_lines)
                .block(popup_block)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(Color::Black)),
            popup_area,
        );
    }

    fn render_confirm(&self, f: &mut Frame, id: u64) {
        let area = centered(f.area(), 50, 20);
        f.render_widget(Clear, area);
        let title = self.mirror.get(id).map(|t| t.title.as_str()).unwrap_or("?");
        let lines = vec![
            Line::from(format!("Delete task #{}?", id)),
            Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("y: Delete   n/Esc: Cancel"),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Confirm")
                        .border_style(Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD)),
                ),
            area,
        );
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.drain_outcomes();
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? && self.handle_event(event::read()?) {
                break;
            }
        }
        Ok(())
    }

    /// Wait until every dispatched intent has been applied.
    #[cfg(test)]
    async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.outcome_rx.recv().await {
                Some(outcome) => self.apply_outcome(outcome),
                None => break,
            }
        }
    }
}

/// Render a single task card
fn render_card(f: &mut Frame, area: Rect, task: &Task, color: Color, is_selected: bool) {
    let style = if is_selected {
        Style::default().bg(color).fg(text_on(color)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let mut card_text = vec![Line::from(vec![
        Span::styled(format!("#{} ", task.id), Style::default().add_modifier(Modifier::DIM)),
        Span::raw(task.title.clone()),
    ])];
    if !task.description.is_empty() {
        card_text.push(Line::from(task.description.clone()));
    }

    f.render_widget(
        Paragraph::new(card_text)
            .block(Block::default().borders(Borders::ALL))
            .style(style)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_form(f: &mut Frame, title: &str, form: &TaskForm) {
    let area = centered(f.area(), 60, 40);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} (Enter: Save | Tab: Next field | Esc: Cancel)", title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    for (row, label, field) in [(rows[0], "Title", &form.title), (rows[1], "Description", &form.description)] {
        let border = if field.active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        f.render_widget(
            Paragraph::new(field.value.clone())
                .block(Block::default().borders(Borders::ALL).title(label).border_style(border)),
            row,
        );
        if field.active {
            let x = row.x + 1 + (field.cursor as u16).min(row.width.saturating_sub(3));
            f.set_cursor_position((x, row.y + 1));
        }
    }
}

/// Rect of `percent_x` by `percent_y` centered inside `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y).max(6).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn contains(rect: Rect, at: Point) -> bool {
    at.x >= rect.x && at.x < rect.x + rect.width && at.y >= rect.y && at.y < rect.y + rect.height
}

/// Column under the pointer, if any.
pub fn column_at(areas: &[Rect; 3], at: Point) -> Option<Status> {
    areas
        .iter()
        .position(|&area| contains(area, at))
        .and_then(Status::from_column)
}

/// Card under the pointer, if any.
pub fn card_at(cards: &[(Rect, u64)], at: Point) -> Option<u64> {
    cards.iter().find(|(area, _)| contains(*area, at)).map(|&(_, id)| id)
}
