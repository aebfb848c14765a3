//! Terminal UI
//!
//! Form pane on the left, product grid on the right, log pane at the bottom.
//! One cooperative event loop drives everything: key events are polled with a
//! 100 ms timeout and subscription snapshots are drained non-blockingly on
//! every tick, so a push from the store re-renders the grid without user
//! interaction.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{prelude::*, widgets::*};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

use crate::core::state::AppState;
use crate::db::store::{ProductStore, Subscription};
use crate::form::FormInput;
use crate::render::{CardAction, RenderTree, render};
use crate::services::notification::NoticeKind;
use crate::utils::image;

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Price,
    Stock,
    Description,
    Features,
    Material,
    Dimensions,
    Weight,
    Images,
}

impl Field {
    const ALL: [Field; 10] = [
        Field::Name,
        Field::Category,
        Field::Price,
        Field::Stock,
        Field::Description,
        Field::Features,
        Field::Material,
        Field::Dimensions,
        Field::Weight,
        Field::Images,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Category => "Category",
            Field::Price => "Price",
            Field::Stock => "Stock",
            Field::Description => "Description",
            Field::Features => "Features (comma separated)",
            Field::Material => "Material",
            Field::Dimensions => "Dimensions",
            Field::Weight => "Weight",
            Field::Images => "Images (paths or URLs)",
        }
    }

    fn next(self) -> Field {
        let idx = Field::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Field::ALL[(idx + 1) % Field::ALL.len()]
    }

    fn prev(self) -> Field {
        let idx = Field::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Field::ALL[(idx + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Input state per form field
#[derive(Default)]
pub struct FormFields {
    name: Input,
    category: Input,
    price: Input,
    stock: Input,
    description: Input,
    features: Input,
    material: Input,
    dimensions: Input,
    weight: Input,
    images: Input,
    /// Image list carried while editing, shown as the preview count
    carried_images: usize,
}

impl FormFields {
    fn get_mut(&mut self, field: Field) -> &mut Input {
        match field {
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Price => &mut self.price,
            Field::Stock => &mut self.stock,
            Field::Description => &mut self.description,
            Field::Features => &mut self.features,
            Field::Material => &mut self.material,
            Field::Dimensions => &mut self.dimensions,
            Field::Weight => &mut self.weight,
            Field::Images => &mut self.images,
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => self.name.value(),
            Field::Category => self.category.value(),
            Field::Price => self.price.value(),
            Field::Stock => self.stock.value(),
            Field::Description => self.description.value(),
            Field::Features => self.features.value(),
            Field::Material => self.material.value(),
            Field::Dimensions => self.dimensions.value(),
            Field::Weight => self.weight.value(),
            Field::Images => self.images.value(),
        }
    }

    /// Derive the structured input; local image paths are embedded as data
    /// URIs here, at submit time
    pub fn to_input(&self) -> FormInput {
        let picked: Vec<String> = self
            .images
            .value()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        FormInput {
            name: self.name.value().to_string(),
            category: self.category.value().to_string(),
            price: self.price.value().to_string(),
            description: self.description.value().to_string(),
            stock: self.stock.value().to_string(),
            features: self.features.value().to_string(),
            material: self.material.value().to_string(),
            dimensions: self.dimensions.value().to_string(),
            weight: self.weight.value().to_string(),
            images: image::resolve_selection(&picked),
        }
    }

    /// Populate the inputs from a record under edit
    pub fn set_from(&mut self, input: &FormInput, carried_images: usize) {
        self.name = Input::new(input.name.clone());
        self.category = Input::new(input.category.clone());
        self.price = Input::new(input.price.clone());
        self.stock = Input::new(input.stock.clone());
        self.description = Input::new(input.description.clone());
        self.features = Input::new(input.features.clone());
        self.material = Input::new(input.material.clone());
        self.dimensions = Input::new(input.dimensions.clone());
        self.weight = Input::new(input.weight.clone());
        self.images = Input::default();
        self.carried_images = carried_images;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Moving through the grid
    Browse,
    /// Typing into the form
    Form,
    /// Waiting for y/n on a delete
    ConfirmDelete(String),
}

pub struct App {
    pub state: AppState,
    form: FormFields,
    focus: Field,
    mode: Mode,
    selected: usize,
    tree: RenderTree,
    logger_state: TuiWidgetState,
}

impl App {
    pub fn new(store: std::sync::Arc<dyn ProductStore>) -> Self {
        Self {
            state: AppState::new(store),
            form: FormFields::default(),
            focus: Field::Name,
            mode: Mode::Browse,
            selected: 0,
            tree: render(&[]),
            logger_state: TuiWidgetState::new(),
        }
    }

    fn rerender(&mut self) {
        self.tree = render(self.state.mirror.products());
        if self.selected >= self.state.mirror.len() {
            self.selected = self.state.mirror.len().saturating_sub(1);
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.state
            .mirror
            .products()
            .get(self.selected)
            .map(|p| p.id.clone())
    }
}

/// Run the UI event loop until the user quits
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut subscription: Option<Subscription>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    let quit = handle_key(app, key).await;
                    if quit {
                        return Ok(());
                    }
                }
            }
        }

        // Drain authoritative pushes; each one replaces the mirror wholesale
        if let Some(sub) = subscription.as_mut() {
            let mut changed = false;
            while let Some(snapshot) = sub.try_recv() {
                app.state.mirror.apply_snapshot(snapshot);
                changed = true;
            }
            if changed {
                app.rerender();
            }
        }
    }
}

async fn handle_key(app: &mut App, key: crossterm::event::KeyEvent) -> bool {
    match app.mode.clone() {
        Mode::Browse => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => {
                app.state.controller.reset();
                app.form.clear();
                app.focus = Field::Name;
                app.mode = Mode::Form;
            }
            KeyCode::Char('e') => {
                if let Some(id) = app.selected_id()
                    && let Some(input) = app.state.begin_edit(&id)
                {
                    let carried = app
                        .state
                        .mirror
                        .get(&id)
                        .map(|p| p.images.len())
                        .unwrap_or(0);
                    app.form.set_from(&input, carried);
                    // The form takes focus — the "scroll into view" of a TUI
                    app.focus = Field::Name;
                    app.mode = Mode::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = app.selected_id() {
                    app.mode = Mode::ConfirmDelete(id);
                }
            }
            KeyCode::Up => app.selected = app.selected.saturating_sub(1),
            KeyCode::Down => {
                if app.selected + 1 < app.state.mirror.len() {
                    app.selected += 1;
                }
            }
            KeyCode::PageUp => app.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => app.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {}
        },
        Mode::Form => match key.code {
            KeyCode::Esc => {
                // Cancel: back to create mode, inputs cleared
                app.state.controller.reset();
                app.form.clear();
                app.mode = Mode::Browse;
            }
            KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
            KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
            KeyCode::Enter => {
                let input = app.form.to_input();
                app.state.submit(&input).await;
                // Reset to create mode regardless of write outcome
                app.form.clear();
                app.focus = Field::Name;
                app.mode = Mode::Browse;
                app.rerender();
            }
            _ => {
                app.form.get_mut(app.focus).handle_event(&Event::Key(key));
            }
        },
        Mode::ConfirmDelete(id) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.state.delete(&id).await;
                app.mode = Mode::Browse;
                app.rerender();
            }
            _ => app.mode = Mode::Browse,
        },
    }
    false
}

fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Form + Grid
            Constraint::Length(8), // Logs
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Form
            Constraint::Percentage(60), // Grid
        ])
        .split(chunks[1]);

    draw_header(f, app, chunks[0]);
    draw_form(f, app, main_chunks[0]);
    draw_grid(f, app, main_chunks[1]);
    draw_logs(f, app, chunks[2]);
    draw_toasts(f, app, main_chunks[1]);

    if let Mode::ConfirmDelete(id) = &app.mode {
        let name = app
            .state
            .mirror
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.clone());
        draw_confirm(f, &name);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" Showroom "),
        Span::styled(" Catalog Manager ", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::styled(
            format!(" {} products ", app.state.mirror.len()),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);

    let hint = match app.mode {
        Mode::Browse => "a add · e edit · d delete · ↑/↓ select · q quit",
        Mode::Form => "Tab next field · Enter submit · Esc cancel",
        Mode::ConfirmDelete(_) => "y confirm · any other key cancels",
    };
    let help = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    f.render_widget(help, area);
}

fn draw_form(f: &mut Frame, app: &mut App, area: Rect) {
    let editing = app.state.controller.is_editing();
    let title = if editing {
        " Edit Product "
    } else {
        " Add Product "
    };
    let border = if app.mode == Mode::Form {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::DIM)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for field in Field::ALL {
        let focused = app.mode == Mode::Form && app.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<28}", field.label()), label_style),
            Span::raw(app.form.value(field).to_string()),
        ]));
    }
    if editing && app.form.value(Field::Images).is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} current image(s) kept", app.form.carried_images),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);

    // Cursor on the focused field
    if app.mode == Mode::Form {
        let row = Field::ALL.iter().position(|f| *f == app.focus).unwrap_or(0) as u16;
        let input = app.form.get_mut(app.focus);
        let cursor_x = inner.x + 28 + input.visual_cursor() as u16;
        if row < inner.height {
            f.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y + row));
        }
    }
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Products ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    match &app.tree {
        RenderTree::Empty(empty) => {
            let placeholder = Paragraph::new(vec![
                Line::raw(""),
                Line::styled(
                    empty.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Line::styled(empty.hint.clone(), Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(placeholder, area);
        }
        RenderTree::Grid(cards) => {
            let items: Vec<ListItem> = cards
                .iter()
                .map(|card| {
                    let mut lines = vec![
                        Line::from(vec![
                            Span::styled(
                                card.name.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                            Span::raw("  "),
                            Span::styled(card.category.clone(), Style::default().fg(Color::Cyan)),
                        ]),
                        Line::from(vec![
                            Span::styled(
                                card.price_label.clone(),
                                Style::default().fg(Color::Green),
                            ),
                            Span::raw("  "),
                            Span::styled(
                                card.stock_label.clone(),
                                Style::default().fg(Color::Gray),
                            ),
                        ]),
                        Line::styled(card.description.clone(), Style::default().fg(Color::Gray)),
                        Line::styled(
                            format!("{} image(s)", card.images.len()),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ];
                    if !card.features.is_empty() {
                        lines.push(Line::styled(
                            card.features.join(" · "),
                            Style::default().fg(Color::Blue),
                        ));
                    }
                    for (key, value) in &card.specifications {
                        lines.push(Line::styled(
                            format!("{key}: {value}"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    let actions: Vec<&str> = card
                        .actions
                        .iter()
                        .map(|a| match a {
                            CardAction::Edit => "[e]dit",
                            CardAction::Delete => "[d]elete",
                        })
                        .collect();
                    lines.push(Line::styled(
                        actions.join("  "),
                        Style::default().fg(Color::DarkGray),
                    ));
                    lines.push(Line::raw(""));
                    ListItem::new(lines)
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray));
            let mut list_state = ListState::default().with_selected(Some(app.selected));
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM)),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn draw_toasts(f: &mut Frame, app: &mut App, area: Rect) {
    let notices = app.state.notices.active();
    if notices.is_empty() {
        return;
    }

    let lines: Vec<Line> = notices
        .iter()
        .map(|n| {
            let style = match n.kind {
                NoticeKind::Success => Style::default().fg(Color::Green),
                NoticeKind::Info => Style::default().fg(Color::Blue),
            };
            Line::styled(format!(" {} ", n.message), style.add_modifier(Modifier::BOLD))
        })
        .collect();

    let width = lines
        .iter()
        .map(|l| l.width() as u16)
        .max()
        .unwrap_or(0)
        .min(area.width.saturating_sub(2));
    let height = (lines.len() as u16).min(area.height.saturating_sub(2));
    let toast_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    f.render_widget(Clear, toast_area);
    f.render_widget(Paragraph::new(lines), toast_area);
}

fn draw_confirm(f: &mut Frame, name: &str) {
    let area = f.area();
    let width = (name.len() as u16 + 24).min(area.width);
    let modal = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height / 2,
        width,
        height: 3,
    };

    let prompt = Paragraph::new(format!("Delete \"{name}\"? (y/n)"))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, modal);
    f.render_widget(prompt, modal);
}
