use crate::{
    animation::ease::Ease,
    animation::style::{StyleProp, StyleSink, StyleValue},
    animation::tween::{PropTrack, TweenEngine, TweenHandle, TweenSpec, stagger},
    foundation::core::TargetId,
};

const LINK_RISE_PX: f64 = 50.0;
const LINK_SECS: f64 = 0.6;
const LINK_DELAY_SECS: f64 = 0.3;
const LINK_STAGGER_SECS: f64 = 0.1;
const OPEN_CLASS: &str = "open";

/// What a click did to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// The menu opened.
    Opened,
    /// The menu closed.
    Closed,
}

/// Fullscreen menu with a staggered link entrance.
#[derive(Clone, Debug)]
pub struct Menu {
    open_target: TargetId,
    menu: TargetId,
    close: TargetId,
    links: Vec<TargetId>,
    open: bool,
    link_tweens: Vec<TweenHandle>,
}

impl Menu {
    /// Closed menu.
    pub fn new(open_target: TargetId, menu: TargetId, close: TargetId, links: Vec<TargetId>) -> Self {
        Self {
            open_target,
            menu,
            close,
            links,
            open: false,
            link_tweens: Vec::new(),
        }
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// React to an activation of `target`; `None` when the click is not the menu's.
    pub fn click(
        &mut self,
        target: &TargetId,
        tweens: &mut dyn TweenEngine,
        sink: &mut dyn StyleSink,
    ) -> Option<MenuAction> {
        if !self.open && target == &self.open_target {
            self.open = true;
            sink.apply(&self.menu, StyleProp::Class(OPEN_CLASS.to_owned()), StyleValue::Flag(true));
            self.hide_links(sink);

            if let Some(first) = self.links.first() {
                let base = TweenSpec::timed(
                    first.clone(),
                    vec![
                        PropTrack::new(StyleProp::TranslateY, LINK_RISE_PX, 0.0),
                        PropTrack::new(StyleProp::Opacity, 0.0, 1.0),
                    ],
                    LINK_SECS,
                    Ease::OutQuad,
                )
                .with_delay(LINK_DELAY_SECS);
                self.link_tweens = stagger(&base, &self.links, LINK_STAGGER_SECS)
                    .into_iter()
                    .map(|spec| tweens.animate(spec))
                    .collect();
            }
            return Some(MenuAction::Opened);
        }

        if self.open && (target == &self.close || self.links.contains(target)) {
            self.open = false;
            for handle in self.link_tweens.drain(..) {
                tweens.cancel(handle);
            }
            sink.apply(&self.menu, StyleProp::Class(OPEN_CLASS.to_owned()), StyleValue::Flag(false));
            self.hide_links(sink);
            return Some(MenuAction::Closed);
        }

        None
    }

    fn hide_links(&self, sink: &mut dyn StyleSink) {
        for link in &self.links {
            sink.apply(link, StyleProp::TranslateY, StyleValue::Number(LINK_RISE_PX));
            sink.apply(link, StyleProp::Opacity, StyleValue::Number(0.0));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stages/menu.rs"]
mod tests;
