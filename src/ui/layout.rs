use ratatui::layout::Rect;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 44;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 120, 40);
        let rect = centered_rect(50, 60, area);
        assert!(rect.x + rect.width <= area.width);
        assert!(rect.y + rect.height <= area.height);
    }

    #[test]
    fn test_centered_rect_clamps_to_tiny_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(50, 50, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
