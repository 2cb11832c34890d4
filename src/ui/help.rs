//! Help overlay showing keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::{Style, Modifier};
use ratatui::text::{Line, Span};

use crate::ui::Theme;

const SHORTCUTS: [(&str, &str); 4] = [
    ("q", "Quit"),
    ("p", "Pause or resume sampling"),
    ("r", "Reset chart history"),
    ("?", "Toggle this help"),
];

/// Help overlay showing keyboard shortcuts.
pub struct HelpView;

impl HelpView {
    /// Render the help overlay
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = Self::centered_rect(50, 50, area);

        frame.render_widget(Clear, popup_area);

        let help_block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(theme.block_style);

        let mut help_text = vec![
            Line::from(Span::styled("Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];
        help_text.extend(SHORTCUTS.iter().map(|(key, text)| {
            Line::from(vec![
                Span::styled(*key, theme.key_style),
                Span::raw(format!(" - {text}")),
            ])
        }));

        let help_widget = Paragraph::new(help_text)
            .block(help_block)
            .style(theme.normal_text)
            .alignment(Alignment::Left);

        frame.render_widget(help_widget, popup_area);
    }

    /// Centered rect sized as a percentage of `r`.
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_width = scale(r.width, percent_x.min(100));
        let popup_height = scale(r.height, percent_y.min(100));

        Rect {
            x: r.x + (r.width - popup_width) / 2,
            y: r.y + (r.height - popup_height) / 2,
            width: popup_width,
            height: popup_height,
        }
    }
}

/// `percent` of `len`, computed wide so large terminals don't overflow.
fn scale(len: u16, percent: u16) -> u16 {
    (u32::from(len) * u32::from(percent) / 100) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Rect { x: 0, y: 0, width: 80, height: 24 }, Rect { x: 20, y: 6, width: 40, height: 12 })]
    #[case(Rect { x: 0, y: 0, width: 4000, height: 10 }, Rect { x: 1000, y: 2, width: 2000, height: 5 })]
    #[case(Rect { x: 3, y: 1, width: u16::MAX, height: 1 }, Rect { x: 16387, y: 1, width: 32767, height: 0 })]
    fn popup_is_centered(#[case] area: Rect, #[case] expected: Rect) {
        assert_eq!(HelpView::centered_rect(50, 50, area), expected);
    }

    #[test]
    fn percentages_above_100_are_capped() {
        let area = Rect { x: 0, y: 0, width: 2000, height: 40 };
        assert_eq!(HelpView::centered_rect(150, 100, area), area);
    }
}
