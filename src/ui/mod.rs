mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Popup, Section};
use crate::render::Component;
use crate::theme::Theme;

fn title_style(t: &Theme, active: bool) -> Style {
    if active {
        Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.inactive)
    }
}

fn boxed<'a>(t: &Theme, title: String, active: bool) -> Block<'a> {
    let border_color = if active { t.accent } else { t.inactive };
    Block::default()
        .title(Span::styled(title, title_style(t, active)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

fn section_heading(t: &Theme, text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(t.header).add_modifier(Modifier::BOLD),
    ))
}

fn key_line(t: &Theme, key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::default().fg(t.accent)),
        Span::raw(action),
    ])
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(8),    // Gallery + component
            Constraint::Length(1), // Footer
        ])
        .split(area);

    // Narrow terminals get a slimmer gallery
    let gallery_width = if area.width < 90 { 24 } else { 32 };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(gallery_width), Constraint::Min(30)])
        .split(chunks[1]);

    draw_info_line(f, app, chunks[0]);
    draw_gallery(f, app, body[0]);
    draw_component(f, app, body[1]);
    draw_footer(f, app, chunks[2]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, app),
        Popup::Input => draw_input_popup(f, app),
        Popup::Preview => draw_preview_popup(f, app),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    // Priority: status message > pending requests > site summary
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(t.warning)))
    } else if app.pending_requests() > 0 {
        Line::from(vec![
            Span::styled("⏳ ", Style::default().fg(t.accent)),
            Span::styled(
                format!("{} request(s) in flight", app.pending_requests()),
                Style::default().fg(t.text),
            ),
        ])
    } else {
        let options = &app.site.options;
        Line::from(vec![
            Span::styled("theme ", Style::default().fg(t.text_dim)),
            Span::styled(options.theme.as_str(), Style::default().fg(t.accent)),
            Span::styled(" │ layout ", Style::default().fg(t.text_dim)),
            Span::styled(options.layout.as_str(), Style::default().fg(t.accent)),
            Span::styled(" │ scheme ", Style::default().fg(t.text_dim)),
            Span::styled(app.site.dark_mode.scheme().as_str(), Style::default().fg(t.accent)),
            Span::styled(" │ lang ", Style::default().fg(t.text_dim)),
            Span::styled(app.site.language.selected().code(), Style::default().fg(t.accent)),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_gallery(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let is_active = app.section == Section::Gallery;
    let block = boxed(t, " Components ".to_string(), is_active);

    // Keep the selection in view on short terminals
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.selected.saturating_sub(visible.saturating_sub(1));

    let rows: Vec<Row> = Component::ALL
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, component)| {
            let row_style = if i == app.selected {
                Style::default().bg(t.bg_selected).fg(t.text)
            } else {
                Style::default()
            };
            Row::new(vec![
                Span::styled(format!("{:>2}", i + 1), Style::default().fg(t.text_dim)),
                Span::styled(component.name(), Style::default().fg(t.text)),
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(3), Constraint::Min(10)]).block(block);
    f.render_widget(table, area);
}

fn draw_component(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let component = app.component();
    let is_active = app.section == Section::Component;
    let block = boxed(t, format!(" {} ", component.name()), is_active);

    let mut lines = vec![
        Line::from(Span::styled(component.description(), Style::default().fg(t.text_dim))),
        Line::from(""),
    ];
    lines.extend(components::body(app));

    // Scroll so the cursor row stays on screen
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (app.cursor + 6).saturating_sub(visible);

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let mut hints: Vec<(&str, &str)> = match app.section {
        Section::Gallery => vec![("↑↓", "Nav"), ("Enter", "Open")],
        Section::Component => {
            let mut hints = components::hints(app.component()).to_vec();
            hints.push(("Esc", "Back"));
            hints
        }
    };
    hints.extend([("v", "Markup"), ("E", "Export"), ("?", "Help")]);

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 {
        4
    } else if area.width < 100 {
        6
    } else {
        hints.len()
    };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(t.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(t.text_dim)),
            ]
        })
        .collect();

    // Footer is commands legend ONLY - no status messages here
    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 85 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        section_heading(t, "═══ Navigation ═══"),
        key_line(t, "Tab", "Switch between the component list and the component"),
        key_line(t, "↑/↓ j/k", "Move in lists and forms"),
        key_line(t, "Enter", "Open a component, edit a field"),
        key_line(t, "Esc", "Close dialogs, then go back to the list"),
        Line::from(""),
        section_heading(t, "═══ Markup ═══"),
        key_line(t, "v", "Preview the selected component's HTML"),
        key_line(t, "E", "Export the whole demo page to page.html"),
        key_line(t, "T", "Cycle the site theme"),
        Line::from(""),
        section_heading(t, "═══ Forms ═══"),
        key_line(t, "Enter", "Edit text, flip a checkbox, cycle a select"),
        key_line(t, "s", "Submit (checkout, contact, newsletter, login)"),
        Line::from(""),
        section_heading(t, "═══ Command Line ═══"),
        key_line(t, "--list", "Print the component registry as JSON"),
        key_line(t, "--render", "Print one component's markup (repeatable)"),
        key_line(t, "--page", "Wrap the rendered components in a document"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(t.text_dim)),
            Span::styled("?", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("Esc", Style::default().fg(t.accent)),
            Span::styled(" to close", Style::default().fg(t.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" tuskblocks Help ", Style::default().fg(t.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_input_popup(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let width = if area.width < 80 { 90 } else { 60 };
    let popup_area = centered_rect(width, 20, area);
    let popup_area = Rect {
        height: popup_area.height.clamp(3, 5),
        ..popup_area
    };

    f.render_widget(Clear, popup_area);

    let input = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}_", app.input_buffer),
            Style::default().fg(t.text),
        )),
        Line::from(Span::styled(
            "Enter confirm │ Esc cancel",
            Style::default().fg(t.text_dim),
        )),
    ])
    .block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", app.input_label),
                Style::default().fg(t.accent),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent)),
    );
    f.render_widget(input, popup_area);
}

fn draw_preview_popup(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 100 { 95 } else { 80 },
        if area.height < 35 { 90 } else { 80 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let lines: Vec<Line> = app
        .preview
        .lines()
        .skip(app.preview_scroll)
        .take(popup_area.height.saturating_sub(2) as usize)
        .map(|line| {
            if line.starts_with("</") {
                Line::styled(line, Style::default().fg(t.text_dim))
            } else if line.starts_with('<') {
                Line::styled(line, Style::default().fg(t.accent))
            } else {
                Line::styled(line, Style::default().fg(t.text))
            }
        })
        .collect();

    let total = app.preview.lines().count();
    let preview = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                format!(" {} markup ({}/{}) ", app.component().name(), app.preview_scroll + 1, total),
                Style::default().fg(t.accent),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent)),
    );
    f.render_widget(preview, popup_area);
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
