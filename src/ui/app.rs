//! Camp UI application
//!
//! Coordinates rendering and input handling for the camp screen.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::game::{CampSession, Run};
use crate::progression::BuildingView;
use crate::save::Storage;
use crate::world::{Chapter, ChunkKind, FINAL_CHAPTER};

/// Main UI application
pub struct App {
    /// Highlighted building row
    cursor: usize,
    /// Chapter used for previews (1-based)
    chapter: u32,
    /// Last generated chapter preview
    preview: Option<Run>,
    /// One-line feedback shown in the footer
    status: String,
    rng: StdRng,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            cursor: 0,
            chapter: 1,
            preview: None,
            status: String::from("Spend bones to strengthen the camp."),
            rng,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn preview(&self) -> Option<&Run> {
        self.preview.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input<S: Storage>(&mut self, key: KeyEvent, session: &mut CampSession<S>) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        let rows = session.catalog().buildings.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < rows {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.buy_selected(session)?,
            KeyCode::Char(c @ '1'..='9') => {
                let chapter = c.to_digit(10).unwrap_or(1);
                if chapter <= FINAL_CHAPTER {
                    self.chapter = chapter;
                    self.preview = None;
                    self.status = format!("Chapter {} selected: {}", chapter, Chapter::from_index(chapter).name());
                }
            }
            KeyCode::Char('p') => {
                let run = session.start_run(self.chapter, &mut self.rng);
                self.status = format!("Scouted chapter {} ({} chunks)", self.chapter, run.level.len());
                self.preview = Some(run);
            }
            _ => {}
        }
        Ok(false)
    }

    fn buy_selected<S: Storage>(&mut self, session: &mut CampSession<S>) -> Result<()> {
        let Some(definition) = session.catalog().buildings.get(self.cursor) else {
            return Ok(());
        };
        let id = definition.id;
        let name = definition.name.clone();

        if session.upgrade(id)? {
            self.status = format!("{} upgraded to level {}", name, session.record().level(id));
            self.preview = None;
        } else {
            self.status = format!("Cannot upgrade {}", name);
        }
        Ok(())
    }

    pub fn render<S: Storage>(&self, frame: &mut Frame, session: &CampSession<S>) {
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(7),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_header(frame, session, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        let views = session.views();
        self.render_buildings(frame, &views, middle[0]);
        self.render_details(frame, views.get(self.cursor), middle[1]);
        self.render_preview(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);
    }

    fn render_header<S: Storage>(&self, frame: &mut Frame, session: &CampSession<S>, area: Rect) {
        let record = session.record();
        let line = Line::from(vec![
            Span::styled("Bones: ", Style::default().fg(Color::Gray)),
            Span::styled(
                record.currency.to_string(),
                Style::default().fg(Color::Rgb(230, 220, 190)).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Runs: ", Style::default().fg(Color::Gray)),
            Span::raw(record.total_runs.to_string()),
            Span::raw("   "),
            Span::styled("Best chapter: ", Style::default().fg(Color::Gray)),
            Span::raw(record.best_chapter_reached.to_string()),
            Span::raw("   "),
            Span::styled("Weapons: ", Style::default().fg(Color::Gray)),
            Span::raw(
                record
                    .unlocked_weapons
                    .iter()
                    .map(|w| w.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Stone Age Camp ")
            .border_style(Style::default().fg(Color::Rgb(160, 110, 60)));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_buildings(&self, frame: &mut Frame, views: &[BuildingView<'_>], area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Buildings ")
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines: Vec<Line> = Vec::new();
        for (i, view) in views.iter().enumerate() {
            let is_selected = i == self.cursor;
            let prefix = if is_selected { "► " } else { "  " };

            let name_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let cost = match view.next_cost {
                Some(cost) => format!("{} bones", cost),
                None => String::from("MAX"),
            };
            let cost_style = if view.is_maxed() {
                Style::default().fg(Color::DarkGray)
            } else if view.affordable {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:<14}", view.definition.name), name_style),
                Span::raw(format!(" Lv {}/{}  ", view.level, view.definition.max_level)),
                Span::styled(cost, cost_style),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_details(&self, frame: &mut Frame, view: Option<&BuildingView<'_>>, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Details ");
        let Some(view) = view else {
            frame.render_widget(block, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                view.definition.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                view.definition.description.as_str(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];
        lines.push(Line::from(format!("Current: {}", view.current_effect.unwrap_or("none"))));
        match view.next_effect {
            Some(effect) => lines.push(Line::from(Span::styled(
                format!("Next:    {}", effect),
                Style::default().fg(Color::Cyan),
            ))),
            None => lines.push(Line::from(Span::styled("Fully upgraded", Style::default().fg(Color::DarkGray)))),
        }

        let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(para, area);
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let theme = Chapter::from_index(self.chapter);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Chapter {}: {} ", self.chapter, theme.name()));

        let lines = match &self.preview {
            Some(run) => {
                let level = &run.level;
                let params = &run.parameters;
                vec![
                    Line::from(Span::styled(
                        level.glyph_strip(),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(
                        "{} chunks, {} enemies, {} combat, special: {}",
                        level.len(),
                        level.enemy_count(),
                        level.count_kind(ChunkKind::Combat),
                        level.special_room().map(|c| c.kind.id()).unwrap_or_else(|| "none".to_string()),
                    )),
                    Line::from(format!(
                        "HP {}  crit +{:.0}%  speed x{:.2}  totem drop {:.0}%  weapon {}",
                        params.max_hp,
                        params.crit_chance_bonus * 100.0,
                        params.move_speed_multiplier,
                        params.totem_drop_chance * 100.0,
                        params.loadout.primary.name(),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                theme.config().description,
                Style::default().fg(Color::DarkGray),
            ))],
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(self.status.as_str(), Style::default().fg(Color::White))),
            Line::from(Span::styled(
                "[↑↓] Select  [Enter] Upgrade  [1-3] Chapter  [P] Preview  [Q] Quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{BuildingId, CampCatalog};
    use crate::save::{MemoryStorage, ProgressionRecord, ProgressionStore};
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Press;
        key
    }

    fn session(currency: u32) -> CampSession<MemoryStorage> {
        let mut store = ProgressionStore::new(MemoryStorage::new());
        store
            .save(&ProgressionRecord { currency, ..ProgressionRecord::default() })
            .unwrap();
        CampSession::open(store, CampCatalog::default())
    }

    #[test]
    fn test_enter_buys_selected_building() {
        let mut app = App::with_rng(StdRng::seed_from_u64(1));
        let mut session = session(50);

        assert!(!app.handle_input(press(KeyCode::Enter), &mut session).unwrap());
        assert_eq!(session.record().level(BuildingId::WeaponBench), 1);
        assert_eq!(session.record().currency, 20);
    }

    #[test]
    fn test_cursor_stays_in_range() {
        let mut app = App::with_rng(StdRng::seed_from_u64(1));
        let mut session = session(0);

        app.handle_input(press(KeyCode::Up), &mut session).unwrap();
        assert_eq!(app.cursor(), 0);
        for _ in 0..10 {
            app.handle_input(press(KeyCode::Down), &mut session).unwrap();
        }
        assert_eq!(app.cursor(), 2);
    }

    #[test]
    fn test_chapter_keys_and_preview() {
        let mut app = App::with_rng(StdRng::seed_from_u64(1));
        let mut session = session(0);

        app.handle_input(press(KeyCode::Char('3')), &mut session).unwrap();
        assert_eq!(app.chapter(), 3);
        app.handle_input(press(KeyCode::Char('7')), &mut session).unwrap();
        assert_eq!(app.chapter(), 3);

        app.handle_input(press(KeyCode::Char('p')), &mut session).unwrap();
        assert_eq!(app.preview().map(|run| run.level.len()), Some(12));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::with_rng(StdRng::seed_from_u64(1));
        let mut session = session(0);
        assert!(app.handle_input(press(KeyCode::Char('q')), &mut session).unwrap());
        assert!(app.handle_input(press(KeyCode::Esc), &mut session).unwrap());
    }
}
