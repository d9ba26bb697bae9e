//! Позиционирование всплывающей подсказки относительно элемента-триггера.
//!
//! Координаты в системе viewport (`position: fixed`). Первый кадр ставит
//! подсказку под триггером по центру, следующие кадры, когда известен
//! реальный размер подсказки, поправляют её через [`fit_to_viewport`].

/// Отступ между триггером и подсказкой, px
pub const TOOLTIP_GAP: f64 = 8.0;
/// Минимальное расстояние до края окна, px
pub const VIEWPORT_MARGIN: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Below,
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub side: Side,
}

impl Placement {
    /// Inline-style для элемента подсказки
    pub fn to_style(&self) -> String {
        format!(
            "position: fixed; left: {:.0}px; top: {:.0}px; z-index: 1000;",
            self.left, self.top
        )
    }
}

/// Под триггером, по центру; без учёта границ окна
pub fn initial_placement(trigger: Rect, tooltip_width: f64, gap: f64) -> Placement {
    Placement {
        left: trigger.center_x() - tooltip_width / 2.0,
        top: trigger.bottom() + gap,
        side: Side::Below,
    }
}

/// Переворачивает подсказку наверх, если снизу не хватает места, а сверху
/// хватает; по горизонтали прижимает к краям окна.
pub fn fit_to_viewport(
    trigger: Rect,
    tooltip: Size,
    viewport: Size,
    gap: f64,
    margin: f64,
) -> Placement {
    let below_top = trigger.bottom() + gap;
    let above_top = trigger.top - gap - tooltip.height;
    let fits_below = below_top + tooltip.height <= viewport.height - margin;
    let fits_above = above_top >= margin;

    let (top, side) = if !fits_below && fits_above {
        (above_top, Side::Above)
    } else {
        (below_top, Side::Below)
    };

    let max_left = (viewport.width - margin - tooltip.width).max(margin);
    let left = (trigger.center_x() - tooltip.width / 2.0).clamp(margin, max_left);

    Placement { left, top, side }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn test_initial_is_centered_below() {
        let trigger = Rect::new(100.0, 50.0, 80.0, 20.0);
        let p = initial_placement(trigger, 200.0, TOOLTIP_GAP);
        assert_eq!(p.left, 40.0);
        assert_eq!(p.top, 78.0);
        assert_eq!(p.side, Side::Below);
    }

    #[test]
    fn test_fits_below() {
        let trigger = Rect::new(500.0, 100.0, 100.0, 24.0);
        let p = fit_to_viewport(trigger, Size::new(240.0, 180.0), VIEWPORT, 8.0, 8.0);
        assert_eq!(p.side, Side::Below);
        assert_eq!(p.top, 132.0);
        assert_eq!(p.left, 430.0);
    }

    #[test]
    fn test_flips_above_near_bottom() {
        let trigger = Rect::new(500.0, 700.0, 100.0, 24.0);
        let p = fit_to_viewport(trigger, Size::new(240.0, 180.0), VIEWPORT, 8.0, 8.0);
        assert_eq!(p.side, Side::Above);
        assert_eq!(p.top, 700.0 - 8.0 - 180.0);
    }

    #[test]
    fn test_stays_below_when_no_room_anywhere() {
        let trigger = Rect::new(500.0, 300.0, 100.0, 24.0);
        let p = fit_to_viewport(trigger, Size::new(240.0, 700.0), VIEWPORT, 8.0, 8.0);
        assert_eq!(p.side, Side::Below);
    }

    #[test]
    fn test_clamps_horizontally() {
        let left_edge = Rect::new(0.0, 100.0, 40.0, 24.0);
        let p = fit_to_viewport(left_edge, Size::new(240.0, 100.0), VIEWPORT, 8.0, 8.0);
        assert_eq!(p.left, 8.0);

        let right_edge = Rect::new(1250.0, 100.0, 30.0, 24.0);
        let p = fit_to_viewport(right_edge, Size::new(240.0, 100.0), VIEWPORT, 8.0, 8.0);
        assert_eq!(p.left, 1280.0 - 8.0 - 240.0);
    }

    #[test]
    fn test_wider_than_viewport_sticks_to_margin() {
        let trigger = Rect::new(100.0, 100.0, 40.0, 24.0);
        let p = fit_to_viewport(trigger, Size::new(2000.0, 100.0), VIEWPORT, 8.0, 8.0);
        assert_eq!(p.left, 8.0);
    }
}
