// src/compose/content.rs
//! Authored homepage copy. Independent of the content hub.

use super::{
    customer_href, highlight, strong, text, CallToAction, FlagBlock, FlagsSection, HeroBlock,
    InterstitialTitle, NumbersBlock, NumbersSection, StatResult, StatsSection, Tone,
};
use crate::types::Slug;

const SIGNUP_URL: &str = "https://dashboard.datocms.com/signup";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn flag(tone: Tone, title: Vec<super::Inline>, image: &str, body: &str, bullets: &[&str]) -> FlagBlock {
    FlagBlock {
        tone,
        title,
        image: image.to_string(),
        body: body.to_string(),
        bullets: strings(bullets),
    }
}

pub(super) fn hero() -> HeroBlock {
    HeroBlock {
        title: vec![
            text("The best companies are built on "),
            highlight(None, "unified content"),
        ],
        subtitle: "More than 4.000 businesses use DatoCMS to create their online content at \
                   scale from a central hub, and distribute it easily via API to websites and \
                   any other digital experience."
            .to_string(),
        checks: strings(&["No credit card", "Easy setup"]),
        cta: CallToAction {
            label: "Try it now for free!".to_string(),
            href: SIGNUP_URL.to_string(),
        },
        clients: strings(&["dropbox", "hashicorp", "verizon", "vmware", "linkedin"]),
    }
}

pub(super) fn problem_flags() -> FlagsSection {
    FlagsSection {
        intro: InterstitialTitle {
            title: vec![
                text("Are you losing money because of "),
                highlight(None, "legacy content infrastructure"),
                text("?"),
            ],
            subtitle: Some("Three symptoms to watch out".to_string()),
        },
        illustration: None,
        flags: vec![
            flag(
                Tone::Bad,
                vec![
                    text("Is content spread across "),
                    highlight(Some(Tone::Bad), "endless different CMSs"),
                    text("?"),
                ],
                "random-things",
                "How can you deliver a cohesive brand and message strategy if your company \
                 functions in silos and information is manually copy-pasted across tens of \
                 different platforms?",
                &[
                    "Out-of-sync content",
                    "Redundant expenses",
                    "Internal inefficiencies",
                ],
            ),
            flag(
                Tone::Bad,
                vec![
                    text("Are you slowed down by "),
                    highlight(Some(Tone::Bad), "legacy technology?"),
                ],
                "stale-flower",
                "Your customers demand blazing-fast digital products, web standards are \
                 evolving at the speed of light, yet you rely on 15-years-old solutions like \
                 Wordpress that force you to deliver heavy, low-quality user experiences.",
                &[
                    "Slow development times",
                    "Rigid structures and models",
                    "Poor performance in websites and apps",
                ],
            ),
            flag(
                Tone::Bad,
                vec![
                    text("Is your infrastructure "),
                    highlight(Some(Tone::Bad), "ready for scale?"),
                ],
                "waves",
                "New channels, new markets, complex use cases, fast iterations. You can no \
                 longer afford to think locally. You need to have a reliable solution that is \
                 capable of following your growth, globally, and lets you adapt along the \
                 journey.",
                &[
                    "Complex data migrations",
                    "Slow access times",
                    "Missing integrations to new technology",
                ],
            ),
        ],
    }
}

pub(super) fn stats() -> StatsSection {
    StatsSection {
        title: "How much is this already costing you?".to_string(),
        results: vec![
            StatResult {
                number: "89%".to_string(),
                label: vec![text("of "), highlight(Some(Tone::Bad), "customer loss")],
                body: vec![
                    text("According to "),
                    strong("Gartner"),
                    text(" 89 percent of companies plan to compete primarily on the basis of CX this year."),
                ],
            },
            StatResult {
                number: "86%".to_string(),
                label: vec![text("of buyers "), highlight(Some(Tone::Warning), "pay more")],
                body: vec![
                    strong("Harris"),
                    text(" found 86% of consumers stop interacting/buying from businesses if they have a bad experience."),
                ],
            },
            StatResult {
                number: "25%".to_string(),
                label: vec![highlight(Some(Tone::Good), "in profitability")],
                body: vec![
                    strong("Oracle"),
                    text(" reported that multichannel integration has the ability to increase profitability by 25 percent."),
                ],
            },
        ],
    }
}

pub(super) fn solution_flags() -> FlagsSection {
    FlagsSection {
        intro: InterstitialTitle {
            title: vec![text("Here's how an Headless CMS can help your company")],
            subtitle: None,
        },
        illustration: Some("omnichannel".to_string()),
        flags: vec![
            flag(
                Tone::Good,
                vec![
                    text("Manage all your content "),
                    highlight(None, "in one place"),
                ],
                "box-things",
                "Headless CMS means keeping everyone on the same page, storing everything in \
                 a single centralized hub, making an edit and publish it instantly, everywhere.",
                &[
                    "Access every bit of copy, anytime",
                    "Your content becomes future-proof",
                    "Deliver real omnichannel experiences",
                ],
            ),
            flag(
                Tone::Good,
                vec![
                    text("From idea to market "),
                    highlight(None, "in hours"),
                    text(", not months"),
                ],
                "people",
                "Test and iterate painlessly, no matter what\u{2019}s the digital product \
                 you\u{2019}re working on, without reaching out to your IT for complex migrations.",
                &[
                    "Flexible content model",
                    "Fast iterations, instant prototyping",
                    "Repeatable architecture for all your projects",
                ],
            ),
            flag(
                Tone::Good,
                vec![
                    text("A "),
                    highlight(None, "global delivery network"),
                    text(" at your service"),
                ],
                "muscles",
                "With a network that spans 200 cities in more than 90 countries, you can be \
                 sure your content is always accessible, performant, secure, and close to \
                 every customer.",
                &[
                    "Reduced architectural complexities",
                    "Scalability is built-in",
                    "Integrations ready with any digital product",
                ],
            ),
        ],
    }
}

/// Headline figures, each linking to the customer story behind it.
const CUSTOMER_NUMBERS: [(&str, &str, &str); 3] = [
    ("chillys", "+134%", "Mobile conversion rate"),
    ("wonderland", "6x", "Faster loading times"),
    ("matter-supply", "0,9s", "First contentful paint"),
];

pub(super) fn numbers() -> NumbersSection {
    NumbersSection {
        title: "Why you should use DatoCMS".to_string(),
        blocks: CUSTOMER_NUMBERS
            .iter()
            .filter_map(|(slug, figure, caption)| {
                let slug = Slug::parse(slug).ok()?;
                Some(NumbersBlock {
                    href: customer_href(&slug),
                    figure: figure.to_string(),
                    logo: slug.to_string(),
                    caption: caption.to_string(),
                })
            })
            .collect(),
    }
}
