use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use skills_leaderboard::report::{format_score, truncate, DISCLAIMER};
use skills_leaderboard::{HighlightStatus, HighlightSummary, Leaderboard, RankedTeam};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Standings,
    Views,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Standings => Page::Views,
            Page::Views => Page::Standings,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages: previous == next
        self.next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(HighlightStatus),
}

impl StatusFilter {
    fn matches(&self, team: &RankedTeam) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => team.status == *status,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::Only(HighlightStatus::Qualified) => "QUALIFIED",
            StatusFilter::Only(HighlightStatus::Provisional) => "PROVISIONAL",
            StatusFilter::Only(HighlightStatus::None) => "UNANNOTATED",
        }
    }
}

pub fn status_color(status: HighlightStatus) -> Color {
    match status {
        HighlightStatus::Qualified => Color::Green,
        HighlightStatus::Provisional => Color::Yellow,
        HighlightStatus::None => Color::White,
    }
}

pub struct App {
    pub teams: Vec<RankedTeam>,
    pub filtered_teams: Vec<RankedTeam>,
    pub state: TableState,
    pub summary: HighlightSummary,
    pub current_page: Page,
    pub show_detail: bool,
    pub filter: StatusFilter,
}

impl App {
    pub fn new(board: Leaderboard) -> Self {
        let summary = board.summary();
        let teams = board.teams;

        let mut state = TableState::default();
        if !teams.is_empty() {
            state.select(Some(0));
        }

        Self {
            filtered_teams: teams.clone(),
            teams,
            state,
            summary,
            current_page: Page::Standings,
            show_detail: false,
            filter: StatusFilter::All,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_team(&self) -> Option<&RankedTeam> {
        self.state.selected().and_then(|i| self.filtered_teams.get(i))
    }

    pub fn apply_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.filtered_teams = self
            .teams
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();

        if !self.filtered_teams.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(StatusFilter::All);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.filtered_teams.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.filtered_teams.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.filtered_teams.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 20).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.filtered_teams.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(20),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.filtered_teams.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if let Some(last) = self.filtered_teams.len().checked_sub(1) {
            self.state.select(Some(last));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('c') => {
                    app.clear_filter();
                    app.current_page = Page::Standings;
                }
                KeyCode::Char(c @ '1'..='4') if app.current_page == Page::Views => {
                    let filter = match c {
                        '1' => StatusFilter::All,
                        '2' => StatusFilter::Only(HighlightStatus::Qualified),
                        '3' => StatusFilter::Only(HighlightStatus::Provisional),
                        _ => StatusFilter::Only(HighlightStatus::None),
                    };
                    app.apply_filter(filter);
                    app.current_page = Page::Standings;
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header: tabs + legend
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Standings {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Standings => render_table(f, chunks[1], app),
            Page::Views => render_views(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [(Page::Standings, "Standings"), (Page::Views, "Views")];

    let mut tab_spans = vec![];
    for (i, (page, name)) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(*name, style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Teams: {}", app.summary.total_teams),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("✓ {}", app.summary.qualified),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("~ {}", app.summary.provisional),
        Style::default().fg(Color::Yellow),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("cap {}", app.summary.cap),
        Style::default().fg(Color::DarkGray),
    ));

    let legend = Line::from(vec![
        Span::styled("Green", Style::default().fg(Color::Green)),
        Span::raw(format!(": \"{}\"  ", HighlightStatus::Qualified.label())),
        Span::styled("Yellow", Style::default().fg(Color::Yellow)),
        Span::raw(format!(": \"{}\"", HighlightStatus::Provisional.label())),
    ]);

    let header = Paragraph::new(vec![Line::from(tab_spans), legend]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Rank", "Total", "Programming", "Driver", "Team #", "Team Name"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_teams.iter().map(|team| {
        let cells = vec![
            Cell::from(team.rank.to_string()),
            Cell::from(format_score(team.total_score)),
            Cell::from(format_score(team.programming_score)),
            Cell::from(format_score(team.driver_score)),
            Cell::from(team.team_number.clone().unwrap_or_else(|| "-".to_string())),
            Cell::from(truncate(&team.team_name, 32)),
        ];

        Row::new(cells)
            .height(1)
            .style(Style::default().fg(status_color(team.status)))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(13),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(34),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Skills Standings "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered_teams.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if app.filter != StatusFilter::All {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", app.filter.name()),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn view_line<'a>(key: &'a str, label: &'a str, count: usize, color: Color, active: bool) -> Line<'a> {
    Line::from(vec![
        Span::raw("  ║ "),
        if active {
            Span::styled("→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw(" ")
        },
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(format!(". {:<28}", label)),
        Span::styled(format!("{:>5} teams", count), Style::default().fg(color)),
        Span::raw("     ║"),
    ])
}

fn render_views(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Quick Views",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  ╔══════════════════════════════════════════════════╗"),
        view_line("1", "All Teams", s.total_teams, Color::White, app.filter == StatusFilter::All),
        Line::from("  ╠══════════════════════════════════════════════════╣"),
        view_line(
            "2",
            "Already Qualified",
            s.qualified,
            Color::Green,
            app.filter == StatusFilter::Only(HighlightStatus::Qualified),
        ),
        view_line(
            "3",
            "Qualify if Season Ends Today",
            s.provisional,
            Color::Yellow,
            app.filter == StatusFilter::Only(HighlightStatus::Provisional),
        ),
        view_line(
            "4",
            "Outside the Cut",
            s.unannotated,
            Color::White,
            app.filter == StatusFilter::Only(HighlightStatus::None),
        ),
        Line::from("  ╚══════════════════════════════════════════════════╝"),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  {}", DISCLAIMER),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Views - Filter by Status "),
    );

    f.render_widget(paragraph, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let team = match app.selected_team() {
        Some(t) => t,
        None => {
            let no_selection = Paragraph::new("No team selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Team Details "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    };

    let status_text = match team.status {
        HighlightStatus::None => "-".to_string(),
        other => other.label().to_string(),
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![label("  Rank: "), Span::raw(team.rank.to_string())]),
        Line::from(""),
        Line::from(vec![label("  Team: "), Span::raw(team.team_name.clone())]),
        Line::from(vec![
            label("  Number: "),
            Span::raw(team.team_number.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            label("  Id: "),
            Span::raw(
                team.team_identifier
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string),
            ),
        ]),
        Line::from(""),
        Line::from(vec![label("  Total: "), Span::raw(format_score(team.total_score))]),
        Line::from(vec![
            label("  Programming: "),
            Span::raw(format_score(team.programming_score)),
        ]),
        Line::from(vec![label("  Driver: "), Span::raw(format_score(team.driver_score))]),
        Line::from(vec![
            label("  Highest Auto: "),
            Span::raw(format_score(team.highest_auto)),
        ]),
        Line::from(""),
        Line::from(vec![
            label("  Status: "),
            Span::styled(status_text, Style::default().fg(status_color(team.status))),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Team Details "),
    );

    f.render_widget(detail_panel, area);
}
