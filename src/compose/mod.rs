// src/compose/mod.rs
//! Composition of a content snapshot into the page render tree.
//!
//! The tree is a fixed sequence of section slots. Authored sections are
//! always present; sections backed by fetched content are omitted when
//! there is nothing to show, so absence is a value rather than an empty
//! component. Blocks carry only what their leaf component needs.

mod content;

use crate::constants::CUSTOMER_ROUTE_PREFIX;
use crate::model::{ContentSnapshot, SuccessStory};
use crate::preview::PreviewGate;
use crate::types::{Duotone, HexColor, Slug, ValidatedUrl};
use serde::Serialize;

/// Emphasis tone of highlighted copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Warning,
    Bad,
}

/// A run of inline copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Highlight {
        #[serde(skip_serializing_if = "Option::is_none")]
        tone: Option<Tone>,
        text: String,
    },
    Strong(String),
}

pub(crate) fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
}

pub(crate) fn highlight(tone: Option<Tone>, s: &str) -> Inline {
    Inline::Highlight {
        tone,
        text: s.to_string(),
    }
}

pub(crate) fn strong(s: &str) -> Inline {
    Inline::Strong(s.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroBlock {
    pub title: Vec<Inline>,
    pub subtitle: String,
    pub checks: Vec<String>,
    pub cta: CallToAction,
    /// Client logo names shown under the hero
    pub clients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterstitialTitle {
    pub title: Vec<Inline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// A comparison flag: a titled claim with supporting bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagBlock {
    pub tone: Tone,
    pub title: Vec<Inline>,
    pub image: String,
    pub body: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagsSection {
    pub intro: InterstitialTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,
    pub flags: Vec<FlagBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatResult {
    pub number: String,
    pub label: Vec<Inline>,
    pub body: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSection {
    pub title: String,
    pub results: Vec<StatResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumbersBlock {
    pub href: String,
    pub figure: String,
    pub logo: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumbersSection {
    pub title: String,
    pub blocks: Vec<NumbersBlock>,
}

/// The persona picker is fully self-contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaPickerBlock {}

/// One customer story teaser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCaseExcerpt {
    pub slug: Slug,
    pub href: String,
    pub title_html: String,
    pub logo_url: ValidatedUrl,
    pub accent: HexColor,
    pub duotone: Duotone,
}

impl UseCaseExcerpt {
    fn from_story(story: &SuccessStory) -> Self {
        Self {
            href: customer_href(&story.slug),
            slug: story.slug.clone(),
            title_html: story.title.as_html().to_string(),
            logo_url: story.logo_url.clone(),
            accent: story.accent_color.clone(),
            duotone: Duotone {
                first: story.duotone_color1.clone(),
                second: story.duotone_color2.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCaseExcerptsSection {
    pub cases: Vec<UseCaseExcerpt>,
}

/// Position of a section in the page. Declaration order is page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSlot {
    Hero,
    ProblemFlags,
    Stats,
    SolutionFlags,
    Numbers,
    PersonaPicker,
    UseCaseExcerpts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Hero(HeroBlock),
    ProblemFlags(FlagsSection),
    Stats(StatsSection),
    SolutionFlags(FlagsSection),
    Numbers(NumbersSection),
    PersonaPicker(PersonaPickerBlock),
    UseCaseExcerpts(UseCaseExcerptsSection),
}

impl Section {
    pub fn slot(&self) -> SectionSlot {
        match self {
            Section::Hero(_) => SectionSlot::Hero,
            Section::ProblemFlags(_) => SectionSlot::ProblemFlags,
            Section::Stats(_) => SectionSlot::Stats,
            Section::SolutionFlags(_) => SectionSlot::SolutionFlags,
            Section::Numbers(_) => SectionSlot::Numbers,
            Section::PersonaPicker(_) => SectionSlot::PersonaPicker,
            Section::UseCaseExcerpts(_) => SectionSlot::UseCaseExcerpts,
        }
    }
}

/// The composed page. Never mutated after [`compose`] returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTree {
    pub preview: bool,
    pub sections: Vec<Section>,
}

impl RenderTree {
    pub fn slots(&self) -> Vec<SectionSlot> {
        self.sections.iter().map(Section::slot).collect()
    }

    pub fn section(&self, slot: SectionSlot) -> Option<&Section> {
        self.sections.iter().find(|s| s.slot() == slot)
    }

    /// Number of story teasers, zero when the section is absent.
    pub fn use_case_count(&self) -> usize {
        match self.section(SectionSlot::UseCaseExcerpts) {
            Some(Section::UseCaseExcerpts(section)) => section.cases.len(),
            _ => 0,
        }
    }
}

pub(crate) fn customer_href(slug: &Slug) -> String {
    format!("{}{}", CUSTOMER_ROUTE_PREFIX, slug)
}

/// Maps a snapshot to the page render tree.
///
/// Pure: the same snapshot and gate always give an equal tree. The gate
/// only travels into the tree; it never changes which sections appear.
pub fn compose(snapshot: &ContentSnapshot, gate: PreviewGate) -> RenderTree {
    let mut sections = vec![
        Section::Hero(content::hero()),
        Section::ProblemFlags(content::problem_flags()),
        Section::Stats(content::stats()),
        Section::SolutionFlags(content::solution_flags()),
        Section::Numbers(content::numbers()),
        Section::PersonaPicker(PersonaPickerBlock {}),
    ];

    let stories = snapshot.success_stories();
    if !stories.is_empty() {
        sections.push(Section::UseCaseExcerpts(UseCaseExcerptsSection {
            cases: stories.iter().map(UseCaseExcerpt::from_story).collect(),
        }));
    }

    RenderTree {
        preview: gate.is_preview(),
        sections,
    }
}
