use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gallery_catalog::{
    write_gallery_exports, Artwork, Catalog, CatalogEntity, CatalogView, Exhibition, ExportProfile,
    Gallery, Lecture,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Artworks,
    Exhibitions,
    Lectures,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Artworks => Page::Exhibitions,
            Page::Exhibitions => Page::Lectures,
            Page::Lectures => Page::Artworks,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Artworks => Page::Lectures,
            Page::Exhibitions => Page::Artworks,
            Page::Lectures => Page::Exhibitions,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Artworks => "Artworks",
            Page::Exhibitions => "Exhibitions",
            Page::Lectures => "Lectures",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    Search,
    ConfirmDelete { code: String, title: String },
    Edit { code: String, field: usize, input: String },
}

pub struct App {
    pub gallery: Gallery,
    pub current_page: Page,
    pub artwork_view: CatalogView,
    pub exhibition_view: CatalogView,
    pub lecture_view: CatalogView,
    pub artwork_state: TableState,
    pub exhibition_state: TableState,
    pub lecture_state: TableState,
    pub mode: Mode,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(gallery: Gallery) -> Self {
        let mut artwork_state = TableState::default();
        if !gallery.artworks.is_empty() {
            artwork_state.select(Some(0));
        }

        let mut exhibition_state = TableState::default();
        if !gallery.exhibitions.is_empty() {
            exhibition_state.select(Some(0));
        }

        let mut lecture_state = TableState::default();
        if !gallery.lectures.is_empty() {
            lecture_state.select(Some(0));
        }

        Self {
            gallery,
            current_page: Page::Artworks,
            artwork_view: CatalogView::new(),
            exhibition_view: CatalogView::new(),
            lecture_view: CatalogView::new(),
            artwork_state,
            exhibition_state,
            lecture_state,
            mode: Mode::Browse,
            status: "Ready".to_string(),
            should_quit: false,
        }
    }

    fn active_view(&self) -> &CatalogView {
        match self.current_page {
            Page::Artworks => &self.artwork_view,
            Page::Exhibitions => &self.exhibition_view,
            Page::Lectures => &self.lecture_view,
        }
    }

    fn active_view_mut(&mut self) -> &mut CatalogView {
        match self.current_page {
            Page::Artworks => &mut self.artwork_view,
            Page::Exhibitions => &mut self.exhibition_view,
            Page::Lectures => &mut self.lecture_view,
        }
    }

    fn active_state(&self) -> &TableState {
        match self.current_page {
            Page::Artworks => &self.artwork_state,
            Page::Exhibitions => &self.exhibition_state,
            Page::Lectures => &self.lecture_state,
        }
    }

    fn active_state_mut(&mut self) -> &mut TableState {
        match self.current_page {
            Page::Artworks => &mut self.artwork_state,
            Page::Exhibitions => &mut self.exhibition_state,
            Page::Lectures => &mut self.lecture_state,
        }
    }

    pub fn visible_len(&self) -> usize {
        match self.current_page {
            Page::Artworks => self
                .artwork_view
                .visible_slice(self.gallery.artworks.records())
                .len(),
            Page::Exhibitions => self
                .exhibition_view
                .visible_slice(self.gallery.exhibitions.records())
                .len(),
            Page::Lectures => self
                .lecture_view
                .visible_slice(self.gallery.lectures.records())
                .len(),
        }
    }

    pub fn filtered_len(&self) -> usize {
        match self.current_page {
            Page::Artworks => self
                .artwork_view
                .filtered_count(self.gallery.artworks.records()),
            Page::Exhibitions => self
                .exhibition_view
                .filtered_count(self.gallery.exhibitions.records()),
            Page::Lectures => self
                .lecture_view
                .filtered_count(self.gallery.lectures.records()),
        }
    }

    pub fn active_has_more(&self) -> bool {
        match self.current_page {
            Page::Artworks => self
                .artwork_view
                .has_more(self.gallery.artworks.records()),
            Page::Exhibitions => self
                .exhibition_view
                .has_more(self.gallery.exhibitions.records()),
            Page::Lectures => self.lecture_view.has_more(self.gallery.lectures.records()),
        }
    }

    fn selected_entry(&self) -> Option<(String, String)> {
        let idx = self.active_state().selected()?;
        match self.current_page {
            Page::Artworks => entry_at(&self.gallery.artworks, &self.artwork_view, idx),
            Page::Exhibitions => entry_at(&self.gallery.exhibitions, &self.exhibition_view, idx),
            Page::Lectures => entry_at(&self.gallery.lectures, &self.lecture_view, idx),
        }
    }

    pub fn selected_code(&self) -> Option<String> {
        self.selected_entry().map(|(code, _)| code)
    }

    /// Advance the debounce clocks; search terms apply on their own once
    /// the typing pause is long enough
    pub fn tick(&mut self) {
        let now = Instant::now();
        let artworks_changed = self.artwork_view.tick(now);
        let exhibitions_changed = self.exhibition_view.tick(now);
        let lectures_changed = self.lecture_view.tick(now);

        let changed = match self.current_page {
            Page::Artworks => artworks_changed,
            Page::Exhibitions => exhibitions_changed,
            Page::Lectures => lectures_changed,
        };

        if changed {
            self.reset_selection();
        } else {
            self.clamp_selection();
        }
    }

    fn reset_selection(&mut self) {
        let len = self.visible_len();
        let state = self.active_state_mut();
        if len == 0 {
            state.select(None);
        } else {
            state.select(Some(0));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let state = self.active_state_mut();
        match state.selected() {
            Some(i) if i >= len => {
                if len == 0 {
                    state.select(None);
                } else {
                    state.select(Some(len - 1));
                }
            }
            None if len > 0 => state.select(Some(0)),
            _ => {}
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.clamp_selection();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.clamp_selection();
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let state = self.active_state_mut();
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let state = self.active_state_mut();
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn open_search(&mut self) {
        self.mode = Mode::Search;
        self.status = format!("Searching {}", self.current_page.title().to_lowercase());
    }

    pub fn search_input(&mut self, c: char) {
        let mut text = self.active_view().live_term().to_string();
        text.push(c);
        self.active_view_mut().set_search_term(&text, Instant::now());
    }

    pub fn search_backspace(&mut self) {
        let mut text = self.active_view().live_term().to_string();
        text.pop();
        self.active_view_mut().set_search_term(&text, Instant::now());
    }

    pub fn finish_search(&mut self) {
        let changed = self.active_view_mut().flush_search();
        if changed {
            self.reset_selection();
        }
        self.mode = Mode::Browse;
        let term = self.active_view().term().to_string();
        self.status = if term.is_empty() {
            "Search cleared".to_string()
        } else {
            format!("Filtering by \"{}\"", term)
        };
    }

    pub fn clear_search(&mut self) {
        let view = self.active_view_mut();
        view.set_search_term("", Instant::now());
        let changed = view.flush_search();
        if changed {
            self.reset_selection();
        }
        self.mode = Mode::Browse;
        self.status = "Search cleared".to_string();
    }

    pub fn load_more(&mut self) {
        if self.active_has_more() {
            self.active_view_mut().load_more();
            self.status = format!("Showing {} of {}", self.visible_len(), self.filtered_len());
        } else {
            self.status = "All matches already visible".to_string();
        }
    }

    /// Mint the next code, register an empty record and drop straight
    /// into an edit session on it
    pub fn begin_add(&mut self) {
        let result = match self.current_page {
            Page::Artworks => {
                let code = self.gallery.artworks.next_code();
                self.gallery
                    .artworks
                    .add(Artwork::new(&code, "Untitled", ""))
                    .map(|_| code)
            }
            Page::Exhibitions => {
                let code = self.gallery.exhibitions.next_code();
                self.gallery
                    .exhibitions
                    .add(Exhibition::new(&code, "Untitled"))
                    .map(|_| code)
            }
            Page::Lectures => {
                let code = self.gallery.lectures.next_code();
                self.gallery
                    .lectures
                    .add(Lecture::new(&code, "Untitled", ""))
                    .map(|_| code)
            }
        };

        match result {
            Ok(code) => {
                // new entries land at the top; drop any filter hiding them
                self.clear_search();
                self.start_edit(&code);
            }
            Err(err) => self.status = format!("⚠ {}", err),
        }
    }

    pub fn begin_edit_selected(&mut self) {
        match self.selected_code() {
            Some(code) => self.start_edit(&code),
            None => self.status = "Nothing selected".to_string(),
        }
    }

    fn start_edit(&mut self, code: &str) {
        let result = match self.current_page {
            Page::Artworks => self.gallery.artworks.start_edit(code),
            Page::Exhibitions => self.gallery.exhibitions.start_edit(code),
            Page::Lectures => self.gallery.lectures.start_edit(code),
        };

        match result {
            Ok(()) => {
                let input = self.field_text(code, 0);
                self.mode = Mode::Edit {
                    code: code.to_string(),
                    field: 0,
                    input,
                };
                self.status = format!("Editing {}", code);
            }
            Err(err) => self.status = format!("⚠ {}", err),
        }
    }

    pub fn edit_fields(&self) -> &'static [&'static str] {
        match self.current_page {
            Page::Artworks => Artwork::EDIT_FIELDS,
            Page::Exhibitions => Exhibition::EDIT_FIELDS,
            Page::Lectures => Lecture::EDIT_FIELDS,
        }
    }

    fn field_text(&self, code: &str, field: usize) -> String {
        let name = match self.edit_fields().get(field) {
            Some(name) => *name,
            None => return String::new(),
        };
        match self.current_page {
            Page::Artworks => session_field_text(&self.gallery.artworks, code, name),
            Page::Exhibitions => session_field_text(&self.gallery.exhibitions, code, name),
            Page::Lectures => session_field_text(&self.gallery.lectures, code, name),
        }
    }

    fn apply_field(&mut self, code: &str, field: usize, value: &str) -> bool {
        let name = match self.edit_fields().get(field) {
            Some(name) => *name,
            None => return false,
        };
        match self.current_page {
            Page::Artworks => set_draft_field(&mut self.gallery.artworks, code, name, value),
            Page::Exhibitions => set_draft_field(&mut self.gallery.exhibitions, code, name, value),
            Page::Lectures => set_draft_field(&mut self.gallery.lectures, code, name, value),
        }
    }

    fn commit_edit(&mut self, code: &str) {
        let result = match self.current_page {
            Page::Artworks => self.gallery.artworks.commit_edit(code),
            Page::Exhibitions => self.gallery.exhibitions.commit_edit(code),
            Page::Lectures => self.gallery.lectures.commit_edit(code),
        };

        match result {
            Ok(()) => {
                self.mode = Mode::Browse;
                self.status = format!("✓ Saved {}", code);
            }
            Err(err) => self.status = format!("⚠ {}", err),
        }
    }

    fn cancel_edit(&mut self, code: &str) {
        let result = match self.current_page {
            Page::Artworks => self.gallery.artworks.cancel_edit(code),
            Page::Exhibitions => self.gallery.exhibitions.cancel_edit(code),
            Page::Lectures => self.gallery.lectures.cancel_edit(code),
        };

        self.mode = Mode::Browse;
        match result {
            Ok(()) => self.status = format!("Discarded changes to {}", code),
            Err(err) => self.status = format!("⚠ {}", err),
        }
    }

    pub fn begin_delete_selected(&mut self) {
        match self.selected_entry() {
            Some((code, title)) => {
                self.mode = Mode::ConfirmDelete { code, title };
            }
            None => self.status = "Nothing selected".to_string(),
        }
    }

    /// Answer the pending delete prompt; removal only happens on a yes
    pub fn resolve_delete(&mut self, confirmed: bool) {
        let code = match &self.mode {
            Mode::ConfirmDelete { code, .. } => code.clone(),
            _ => return,
        };

        let result = match self.current_page {
            Page::Artworks => self.gallery.artworks.remove(&code, |_| confirmed),
            Page::Exhibitions => self.gallery.exhibitions.remove(&code, |_| confirmed),
            Page::Lectures => self.gallery.lectures.remove(&code, |_| confirmed),
        };

        self.mode = Mode::Browse;
        match result {
            Ok(true) => {
                self.status = format!("🗑 Removed {}", code);
                self.clamp_selection();
            }
            Ok(false) => self.status = "Delete cancelled".to_string(),
            Err(err) => self.status = format!("⚠ {}", err),
        }
    }

    pub fn export_all(&mut self) {
        let out_dir = Path::new("exports");
        let mut written = 0;
        for profile in ExportProfile::all() {
            match write_gallery_exports(&mut self.gallery, profile, out_dir) {
                Ok(paths) => written += paths.len(),
                Err(err) => {
                    self.status = format!("⚠ Export failed: {:#}", err);
                    return;
                }
            }
        }
        self.status = format!("📦 Wrote {} files to exports/", written);
    }
}

fn entry_at<E: CatalogEntity>(
    catalog: &Catalog<E>,
    view: &CatalogView,
    idx: usize,
) -> Option<(String, String)> {
    let visible = view.visible_slice(catalog.records());
    visible
        .get(idx)
        .map(|session| {
            let entity = session.entity();
            (entity.code().to_string(), entity.title().to_string())
        })
}

// Draft values while a session is open, committed values otherwise
fn session_field_text<E: CatalogEntity>(catalog: &Catalog<E>, code: &str, field: &str) -> String {
    catalog
        .session(code)
        .and_then(|session| session.draft().or(Some(session.entity())))
        .and_then(|entity| entity.field_text(field))
        .unwrap_or_default()
}

fn set_draft_field<E: CatalogEntity>(
    catalog: &mut Catalog<E>,
    code: &str,
    field: &str,
    value: &str,
) -> bool {
    match catalog.draft_mut(code) {
        Some(draft) => draft.set_field_text(field, value),
        None => false,
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui(f, app))?;

        // Short poll so pending search terms apply without a keypress
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match app.mode {
                    Mode::Browse => handle_browse_key(app, key),
                    Mode::Search => handle_search_key(app, key),
                    Mode::ConfirmDelete { .. } => handle_confirm_key(app, key),
                    Mode::Edit { .. } => handle_edit_key(app, key),
                }

                if app.should_quit {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_page();
            } else {
                app.next_page();
            }
        }
        KeyCode::BackTab => app.previous_page(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('c') => app.clear_search(),
        KeyCode::Char('m') => app.load_more(),
        KeyCode::Char('a') => app.begin_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit_selected(),
        KeyCode::Char('d') => app.begin_delete_selected(),
        KeyCode::Char('x') => app.export_all(),
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::Home => {
            if app.visible_len() > 0 {
                app.active_state_mut().select(Some(0));
            }
        }
        KeyCode::End => {
            let len = app.visible_len();
            if len > 0 {
                app.active_state_mut().select(Some(len - 1));
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.finish_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_input(c),
        _ => {}
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_delete(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.resolve_delete(false),
        _ => {}
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let (code, field, mut input) = match &app.mode {
        Mode::Edit { code, field, input } => (code.clone(), *field, input.clone()),
        _ => return,
    };

    match key.code {
        KeyCode::Esc => app.cancel_edit(&code),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.apply_field(&code, field, &input);
            app.commit_edit(&code);
        }
        KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
            app.apply_field(&code, field, &input);
            let next = (field + 1) % app.edit_fields().len();
            let input = app.field_text(&code, next);
            app.mode = Mode::Edit { code, field: next, input };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.apply_field(&code, field, &input);
            let count = app.edit_fields().len();
            let next = (field + count - 1) % count;
            let input = app.field_text(&code, next);
            app.mode = Mode::Edit { code, field: next, input };
        }
        KeyCode::Backspace => {
            input.pop();
            app.mode = Mode::Edit { code, field, input };
        }
        KeyCode::Char(c) => {
            input.push(c);
            app.mode = Mode::Edit { code, field, input };
        }
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    // Edit sessions get a side panel next to the catalog table
    if matches!(app.mode, Mode::Edit { .. }) {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_catalog_table(f, content_chunks[0], app);
        render_edit_form(f, content_chunks[1], app);
    } else {
        render_catalog_table(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);

    if matches!(app.mode, Mode::ConfirmDelete { .. }) {
        render_confirm_modal(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [
        (Page::Artworks, app.gallery.artworks.len()),
        (Page::Exhibitions, app.gallery.exhibitions.len()),
        (Page::Lectures, app.gallery.lectures.len()),
    ];

    let mut tab_spans = vec![];
    for (i, (page, count)) in pages.iter().enumerate() {
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

        tab_spans.push(Span::styled(format!("{} ({})", page.title(), count), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total: {}", app.gallery.total_entities()),
        Style::default().fg(Color::White),
    ));

    let term = app.active_view().term();
    if !term.is_empty() {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Filter: \"{}\"", term),
            Style::default().fg(Color::Green),
        ));
    }
    if app.active_view().search_pending() {
        tab_spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_catalog_table(f: &mut Frame, area: Rect, app: &mut App) {
    match app.current_page {
        Page::Artworks => render_artworks(f, area, app),
        Page::Exhibitions => render_exhibitions(f, area, app),
        Page::Lectures => render_lectures(f, area, app),
    }
}

fn table_header(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn render_artworks(f: &mut Frame, area: Rect, app: &mut App) {
    let header = table_header(&["Code", "Title", "Artist", "Year", "Size", "Sell"]);

    let visible = app.artwork_view.visible_slice(app.gallery.artworks.records());
    let rows: Vec<Row> = visible
        .iter()
        .map(|session| {
            let artwork = session.entity();
            let style = if session.is_editing() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let cells = vec![
                Cell::from(artwork.code.clone()),
                Cell::from(truncate(&artwork.title, 28)),
                Cell::from(truncate(&artwork.artist, 16)),
                Cell::from(artwork.field_text("year").unwrap_or_default()),
                Cell::from(truncate(&artwork.size, 12)),
                Cell::from(artwork.field_text("sellPrice").unwrap_or_default()),
            ];
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(30),
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Artworks "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.artwork_state);
}

fn render_exhibitions(f: &mut Frame, area: Rect, app: &mut App) {
    let header = table_header(&["Code", "Title", "Date", "Description", "Image"]);

    let visible = app
        .exhibition_view
        .visible_slice(app.gallery.exhibitions.records());
    let rows: Vec<Row> = visible
        .iter()
        .map(|session| {
            let exhibition = session.entity();
            let style = if session.is_editing() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let cells = vec![
                Cell::from(exhibition.code.clone()),
                Cell::from(truncate(&exhibition.title, 28)),
                Cell::from(exhibition.date.clone()),
                Cell::from(truncate(&exhibition.desc, 30)),
                Cell::from(truncate(&exhibition.image_file, 18)),
            ];
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(30),
            Constraint::Length(14),
            Constraint::Length(32),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Exhibitions "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.exhibition_state);
}

fn render_lectures(f: &mut Frame, area: Rect, app: &mut App) {
    let header = table_header(&["Code", "Title", "Speaker", "Date", "Image"]);

    let visible = app.lecture_view.visible_slice(app.gallery.lectures.records());
    let rows: Vec<Row> = visible
        .iter()
        .map(|session| {
            let lecture = session.entity();
            let style = if session.is_editing() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let cells = vec![
                Cell::from(lecture.code.clone()),
                Cell::from(truncate(&lecture.title, 28)),
                Cell::from(truncate(&lecture.speaker, 18)),
                Cell::from(lecture.date.clone()),
                Cell::from(truncate(&lecture.image_file, 18)),
            ];
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(30),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Lectures "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.lecture_state);
}

fn render_edit_form(f: &mut Frame, area: Rect, app: &App) {
    let (code, active_field, input) = match &app.mode {
        Mode::Edit { code, field, input } => (code, *field, input),
        _ => return,
    };

    let mut lines = vec![Line::from("")];
    for (idx, name) in app.edit_fields().iter().enumerate() {
        let value = if idx == active_field {
            format!("{}▌", input)
        } else {
            app.field_text(code, idx)
        };

        let label_style = if idx == active_field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", name), label_style),
            Span::raw(truncate(&value, 40)),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![Span::styled(
        "  Enter next field, Ctrl+S save, Esc discard",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Editing {} ", code)),
    );

    f.render_widget(form, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    match &app.mode {
        Mode::Search => {
            status_spans.push(Span::styled(" Search: ", Style::default().fg(Color::Cyan)));
            status_spans.push(Span::styled(
                format!("{}▌", app.active_view().live_term()),
                Style::default().fg(Color::White),
            ));
            status_spans.push(Span::raw("  | "));
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Apply | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Clear"));
        }
        Mode::Edit { .. } => {
            status_spans.push(Span::styled(
                format!(" {} ", app.status),
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Save | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Discard"));
        }
        Mode::ConfirmDelete { .. } => {
            status_spans.push(Span::styled(
                " Confirm delete ",
                Style::default().fg(Color::Red),
            ));
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("y", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Remove | "));
            status_spans.push(Span::styled("n", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Keep"));
        }
        Mode::Browse => {
            let selected = app.active_state().selected().map(|i| i + 1).unwrap_or(0);
            status_spans.push(Span::styled(
                format!(" Row: {}/{} ", selected, app.visible_len()),
                Style::default().fg(Color::Cyan),
            ));
            if app.active_has_more() {
                status_spans.push(Span::styled(
                    format!("(+{} more) ", app.filtered_len() - app.visible_len()),
                    Style::default().fg(Color::Green),
                ));
            }
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Search | "));
            status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Add | "));
            status_spans.push(Span::styled("e", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Edit | "));
            status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Delete | "));
            status_spans.push(Span::styled("m", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" More | "));
            status_spans.push(Span::styled("x", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Export | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
            if !app.status.is_empty() {
                status_spans.push(Span::raw("  | "));
                status_spans.push(Span::styled(
                    app.status.clone(),
                    Style::default().fg(Color::White),
                ));
            }
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_confirm_modal(f: &mut Frame, app: &App) {
    let (code, title) = match &app.mode {
        Mode::ConfirmDelete { code, title } => (code, title),
        _ => return,
    };

    let area = centered_rect(50, 25, f.size());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Delete this entry?",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(format!("  {}  {}", code, truncate(title, 36))),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(" remove   "),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(" keep"),
        ]),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm Delete "),
    );

    f.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
