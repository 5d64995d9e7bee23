//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive country browser: a filter bar (region,
//! complexity, search), the filtered country list, and a detail overlay
//! for the selected record. Every filter change regenerates the visible
//! list from the loaded collection.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline;
use crate::cli::{ListArgs, SourceArgs};
use crate::data::Dataset;
use crate::domain::{Complexity, Country, Region};
use crate::error::AppError;
use crate::query::CountryFilter;
use crate::report::format::NO_MATCHES;

/// How long a search keystroke may rest before the filter re-runs.
///
/// The event loop polls every 100ms, so the debounce resolves on the next
/// tick after the window elapses.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Start the TUI.
pub fn run(args: ListArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::data(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::data(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::data(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    source: SourceArgs,
    dataset: Dataset,
    filter: CountryFilter,
    /// Indices into `dataset.countries` for the current filtered view.
    visible: Vec<usize>,
    selected: usize,
    editing_search: bool,
    search_input: String,
    /// Applied term to restore when a search edit is canceled.
    search_before: String,
    /// Set on each search keystroke; the filter re-runs once the debounce
    /// window elapses without another keystroke.
    search_dirty_at: Option<Instant>,
    /// Index of the record shown in the detail overlay, if open.
    detail: Option<usize>,
    status: String,
}

impl App {
    fn new(args: ListArgs) -> Self {
        let filter = pipeline::filter_from_args(&args);
        let dataset = pipeline::load_dataset(&args.source);

        let mut app = Self {
            source: args.source,
            search_input: filter.search.clone(),
            search_before: filter.search.clone(),
            dataset,
            filter,
            visible: Vec::new(),
            selected: 0,
            editing_search: false,
            search_dirty_at: None,
            detail: None,
            status: String::new(),
        };
        app.refilter();
        app.status = app.load_status();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::data(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::data(format!("Event poll error: {e}")))?
            {
                if self.flush_search_debounce() {
                    needs_redraw = true;
                }
                continue;
            }

            match event::read().map_err(|e| AppError::data(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the application should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.detail.is_some() {
            match code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.detail = None;
                }
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.editing_search {
            self.handle_search_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => {
                self.filter.region = cycle_region(self.filter.region, false);
                self.refilter();
                self.status = format!("region: {}", region_label(self.filter.region));
            }
            KeyCode::Right => {
                self.filter.region = cycle_region(self.filter.region, true);
                self.refilter();
                self.status = format!("region: {}", region_label(self.filter.region));
            }
            KeyCode::Char('c') => {
                self.filter.complexity = cycle_complexity(self.filter.complexity);
                self.refilter();
                self.status = format!("complexity: {}", complexity_label(self.filter.complexity));
            }
            KeyCode::Char('/') => {
                self.editing_search = true;
                self.search_before = self.filter.search.clone();
                self.search_input = self.filter.search.clone();
                self.status = "Editing search. Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Enter => {
                if let Some(&index) = self.visible.get(self.selected) {
                    self.detail = Some(index);
                } else {
                    self.status = NO_MATCHES.to_string();
                }
            }
            KeyCode::Char('g') => self.reload(),
            _ => {}
        }

        false
    }

    fn handle_search_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_search = false;
                self.search_input = self.search_before.clone();
                self.filter.search = self.search_before.clone();
                self.search_dirty_at = None;
                self.refilter();
                self.status = "Search canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_search = false;
                self.apply_search_input();
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search_dirty_at = Some(Instant::now());
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.search_dirty_at = Some(Instant::now());
            }
            _ => {}
        }
    }

    /// Apply a pending search edit once the debounce window has elapsed.
    fn flush_search_debounce(&mut self) -> bool {
        match self.search_dirty_at {
            Some(dirty_at) if dirty_at.elapsed() >= SEARCH_DEBOUNCE => {
                self.apply_search_input();
                true
            }
            _ => false,
        }
    }

    fn apply_search_input(&mut self) {
        self.filter.search = self.search_input.clone();
        self.search_dirty_at = None;
        self.refilter();
        let term = self.filter.search.trim();
        self.status = if term.is_empty() {
            "Search cleared.".to_string()
        } else {
            format!("{} match(es) for \"{term}\"", self.visible.len())
        };
    }

    /// Regenerate the visible list from scratch and clamp the selection.
    fn refilter(&mut self) {
        self.visible = self.filter.apply_indices(&self.dataset.countries);
        if self.visible.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.visible.len() - 1);
        }
    }

    /// Reload the dataset wholesale from the configured source.
    fn reload(&mut self) {
        self.dataset = pipeline::load_dataset(&self.source);
        self.detail = None;
        self.refilter();
        self.status = self.load_status();
    }

    fn load_status(&self) -> String {
        match &self.dataset.degraded {
            Some(reason) => format!("DEGRADED: {reason} Using embedded fallback data."),
            None => format!(
                "Loaded {} countries from {}.",
                self.dataset.countries.len(),
                self.dataset.source.describe()
            ),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Some(index) = self.detail {
            if let Some(country) = self.dataset.countries.get(index) {
                draw_detail_overlay(frame, size, country);
            }
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("wht", Style::default().fg(Color::Cyan)),
            Span::raw(" — withholding-tax country compliance atlas"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "source: {} | as-of: {} | {} of {} shown",
                self.dataset.source.describe(),
                self.dataset.fetched_at.format("%Y-%m-%d %H:%M UTC"),
                self.visible.len(),
                self.dataset.countries.len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let search_display = if self.editing_search {
            format!("{}▏", self.search_input)
        } else if self.filter.search.trim().is_empty() {
            "-".to_string()
        } else {
            self.filter.search.trim().to_string()
        };
        let filter_style = if self.editing_search {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "region: {} | complexity: {} | search: {search_display}",
                region_label(self.filter.region),
                complexity_label(self.filter.complexity),
            ),
            filter_style,
        )));

        if let Some(reason) = &self.dataset.degraded {
            lines.push(Line::from(Span::styled(
                format!("DEGRADED: {reason} Using embedded fallback data."),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        } else if !self.dataset.row_errors.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(
                    "skipped {} invalid record(s) during load",
                    self.dataset.row_errors.len()
                ),
                Style::default().fg(Color::Yellow),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Countries").borders(Borders::ALL);

        if self.visible.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new(NO_MATCHES).style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&index| ListItem::new(list_line(&self.dataset.countries[index])))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.detail.is_some() {
            "Esc close detail  q quit"
        } else if self.editing_search {
            "type to search  Enter apply  Esc cancel"
        } else {
            "↑/↓ select  ←/→ region  c complexity  / search  Enter detail  g reload  q quit"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn list_line(country: &Country) -> String {
    format!(
        "{} {:<22} {:<9} {:<7} {:>8}h {:>3} impl",
        country.flag,
        country.name,
        country.region.display_name(),
        country.complexity.display_name(),
        country.hours,
        country.implementations,
    )
}

fn draw_detail_overlay(frame: &mut ratatui::Frame<'_>, area: Rect, country: &Country) {
    let popup = centered_rect(80, 80, area);
    frame.render_widget(Clear, popup);

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "{} | {} complexity | {}h | {} implementations",
            country.region.display_name(),
            country.complexity.display_name(),
            country.hours,
            country.implementations,
        ),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Overview", heading)));
    lines.push(Line::raw(country.overview.clone()));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Primary withholding tax types", heading)));
    for tax in &country.tax_types {
        lines.push(Line::raw(format!("- {tax}")));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Key implementation considerations", heading)));
    for item in &country.considerations {
        lines.push(Line::raw(format!("- {item}")));
    }

    let title = format!(" {} {} ({}) ", country.flag, country.name, country.code);
    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(p, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Cycle the region criterion: all -> Americas -> EMEA -> APJ -> LATAM -> all.
fn cycle_region(current: Option<Region>, forward: bool) -> Option<Region> {
    let all = Region::ALL;
    match current {
        None => Some(if forward { all[0] } else { all[all.len() - 1] }),
        Some(region) => {
            let idx = all.iter().position(|r| *r == region).unwrap_or(0);
            if forward {
                if idx + 1 < all.len() { Some(all[idx + 1]) } else { None }
            } else if idx == 0 {
                None
            } else {
                Some(all[idx - 1])
            }
        }
    }
}

/// Cycle the complexity criterion: all -> Low -> Medium -> High -> all.
fn cycle_complexity(current: Option<Complexity>) -> Option<Complexity> {
    let all = Complexity::ALL;
    match current {
        None => Some(all[0]),
        Some(tier) => {
            let idx = all.iter().position(|t| *t == tier).unwrap_or(0);
            if idx + 1 < all.len() { Some(all[idx + 1]) } else { None }
        }
    }
}

fn region_label(region: Option<Region>) -> &'static str {
    region.map_or("all", Region::display_name)
}

fn complexity_label(complexity: Option<Complexity>) -> &'static str {
    complexity.map_or("all", Complexity::display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_cycle_passes_through_all_and_back() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..Region::ALL.len() {
            current = cycle_region(current, true);
            seen.push(current.expect("a region"));
        }
        assert_eq!(seen, Region::ALL.to_vec());
        assert_eq!(cycle_region(current, true), None);

        // Backwards from "all" lands on the last region.
        assert_eq!(cycle_region(None, false), Some(Region::Latam));
        assert_eq!(cycle_region(Some(Region::Americas), false), None);
    }

    #[test]
    fn complexity_cycle_returns_to_all() {
        assert_eq!(cycle_complexity(None), Some(Complexity::Low));
        assert_eq!(cycle_complexity(Some(Complexity::Low)), Some(Complexity::Medium));
        assert_eq!(cycle_complexity(Some(Complexity::Medium)), Some(Complexity::High));
        assert_eq!(cycle_complexity(Some(Complexity::High)), None);
    }

    #[test]
    fn labels_render_all_when_unset() {
        assert_eq!(region_label(None), "all");
        assert_eq!(region_label(Some(Region::Apj)), "APJ");
        assert_eq!(complexity_label(None), "all");
        assert_eq!(complexity_label(Some(Complexity::High)), "High");
    }
}
