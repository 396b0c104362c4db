use crate::model::Product;
use crate::tui::state::{AppState, DRAWER_ENTRIES, Focus, Screen, Tab};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

/// Description snippets in the list are capped at this many display lines.
const SNIPPET_LINES: usize = 2;

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(v_chunks[0]);

    draw_drawer(f, state, h_chunks[0]);

    match state.screen.clone() {
        Screen::Tabs => draw_tabs(f, state, h_chunks[1]),
        Screen::Detail(product) => draw_detail(f, state, h_chunks[1], &product),
        Screen::About => draw_about(f, state, h_chunks[1]),
    }

    draw_footer(f, state, v_chunks[1]);
}

fn draw_drawer(f: &mut Frame, state: &mut AppState, area: Rect) {
    let drawer_style = if state.active_focus == Focus::Drawer {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = DRAWER_ENTRIES
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let active = match state.screen {
                Screen::About => idx == 1,
                _ => idx == 0,
            };
            let prefix = if active { "* " } else { "  " };
            ListItem::new(Line::from(format!("{}{}", prefix, entry)))
        })
        .collect();

    let drawer = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Menu ")
                .border_style(drawer_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(drawer, area, &mut state.drawer_state);
}

fn draw_tabs(f: &mut Frame, state: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tab_bar = Tabs::new(vec!["Home", "Feed"])
        .select(match state.tab {
            Tab::Home => 0,
            Tab::Feed => 1,
        })
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" Makeup Catalog "));
    f.render_widget(tab_bar, chunks[0]);

    match state.tab {
        Tab::Home => draw_catalog(f, state, chunks[1]),
        Tab::Feed => draw_feed(f, state, chunks[1]),
    }
}

fn draw_catalog(f: &mut Frame, state: &mut AppState, area: Rect) {
    let main_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    // While the fetch is pending the list is not rendered at all.
    if state.loading {
        let spinner = Paragraph::new("Loading products...")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Products (Loading...) ")
                    .border_style(main_style),
            );
        f.render_widget(spinner, area);
        return;
    }

    let snippet_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .products
        .iter()
        .map(|p| card_lines(p, snippet_width))
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Products ({}) ", state.products.len()))
                .border_style(main_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(list, area, &mut state.list_state);
}

/// One product card: name, brand + price, then a bounded description
/// snippet. Truncation here is display-only; the underlying record keeps
/// its full text.
fn card_lines(product: &Product, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            product.name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                product.brand().to_string(),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw("  "),
            Span::styled(
                format!("${}", product.price_label()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];
    for snippet in snippet_lines(product.description_text(), width, SNIPPET_LINES) {
        lines.push(Line::from(Span::styled(
            snippet,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn draw_feed(f: &mut Frame, state: &AppState, area: Rect) {
    let main_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let feed = Paragraph::new(
        "News and launches from the world of makeup will show up here.",
    )
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Beauty Feed ")
            .border_style(main_style),
    );
    f.render_widget(feed, area);
}

fn draw_detail(f: &mut Frame, state: &AppState, area: Rect, product: &Product) {
    let main_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            product.name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            product.brand().to_string(),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Type:  ", label),
            Span::raw(product.product_type().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Price: ", label),
            Span::styled(
                format!("${}", product.price_label()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Image: ", label),
            Span::raw(product.image_link().to_string()),
        ]),
        Line::from(""),
        Line::from(product.description_text().to_string()),
    ];

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Product Details ")
                .border_style(main_style),
        );
    f.render_widget(detail, area);
}

fn draw_about(f: &mut Frame, state: &AppState, area: Rect) {
    let main_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let about = Paragraph::new(
        "Maqui is a makeup catalog browser for the terminal, built with \
         ratatui.\n\nProduct data comes from the public makeup API. Select \
         Catalog in the menu to go back to browsing.",
    )
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" About ")
            .border_style(main_style),
    );
    f.render_widget(about, area);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );

    let help_str = match state.active_focus {
        Focus::Drawer => "Enter:Open | Tab:Back to content".to_string(),
        Focus::Main => match &state.screen {
            Screen::Tabs => match state.tab {
                Tab::Home => "Enter:Details | 1:Home 2:Feed | Tab:Menu | q:Quit".to_string(),
                Tab::Feed => "1:Home 2:Feed | Tab:Menu | q:Quit".to_string(),
            },
            Screen::Detail(_) => "Esc:Back | q:Quit".to_string(),
            Screen::About => "Tab:Menu | q:Quit".to_string(),
        },
    };

    let help = Paragraph::new(help_str)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

/// Greedy word-wrap bounded to `max_lines` display lines, ellipsizing the
/// last line when the text overflows.
pub(crate) fn snippet_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(8);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let word: String = word.chars().take(width).collect();
        let candidate = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if candidate <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
            continue;
        }
        // `current` is full; it is line number lines.len() + 1.
        if lines.len() + 1 == max_lines {
            truncated = true;
            break;
        }
        lines.push(std::mem::take(&mut current));
        current = word;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if truncated && let Some(last) = lines.last_mut() {
        if last.chars().count() >= width {
            last.pop();
        }
        last.push('…');
    }
    lines
}
