use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Pending,
    Arrow,
    Build,
    Run,
    Smoke,
    Check,
    Images,
    Diff,
    Clean,
    Push,
    Init,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Progress) => theme::icons::PROGRESS,
            (true, Icon::Pending) => theme::icons::PENDING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Build) => theme::icons::BUILD,
            (true, Icon::Run) => theme::icons::RUN,
            (true, Icon::Smoke) => theme::icons::SMOKE,
            (true, Icon::Check) => theme::icons::CHECK,
            (true, Icon::Images) => theme::icons::IMAGES,
            (true, Icon::Diff) => theme::icons::DIFF,
            (true, Icon::Clean) => theme::icons::CLEAN,
            (true, Icon::Push) => theme::icons::PUSH,
            (true, Icon::Init) => theme::icons::INIT,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Progress) => theme::icons_ascii::PROGRESS,
            (false, Icon::Pending) => theme::icons_ascii::PENDING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Build) => theme::icons_ascii::BUILD,
            (false, Icon::Run) => theme::icons_ascii::RUN,
            (false, Icon::Smoke) => theme::icons_ascii::SMOKE,
            (false, Icon::Check) => theme::icons_ascii::CHECK,
            (false, Icon::Images) => theme::icons_ascii::IMAGES,
            (false, Icon::Diff) => theme::icons_ascii::DIFF,
            (false, Icon::Clean) => theme::icons_ascii::CLEAN,
            (false, Icon::Push) => theme::icons_ascii::PUSH,
            (false, Icon::Init) => theme::icons_ascii::INIT,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Pending | Icon::Arrow => theme::colors::DIM,
            Icon::Clean => theme::colors::WARNING,
            Icon::Build
            | Icon::Run
            | Icon::Smoke
            | Icon::Check
            | Icon::Images
            | Icon::Diff
            | Icon::Push
            | Icon::Init => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
