//! Menu labels and the snippets behind them.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const PRIMARY_OPTIONS: &[&str] = &[
    "VC & Funding Insights",
    "Female Foundry Programs",
    "Community & Stories",
    "Contact & Partners",
];

static SECONDARY_OPTIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "VC & Funding Insights",
            &["Headline metrics", "Deep Tech & AI", "Using the Index"][..],
        ),
        (
            "Female Foundry Programs",
            &["AI Visionaries", "AI Hustle", "Sunday Newsletter"][..],
        ),
        (
            "Community & Stories",
            &["Join the community", "Campaigns", "Shop"][..],
        ),
        (
            "Contact & Partners",
            &["Contact", "Partners", "Media coverage"][..],
        ),
    ])
});

static SNIPPETS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "Headline metrics",
            "• €5.76B raised by female-founded startups in Europe during 2024 (1,305 deals across 1,196 companies).\n\
             • Represents roughly 12% of all European VC; deep tech attracts about one-third of that capital.\n\
             • The Female Innovation Index aggregates 1,200+ survey responses and tracks 145k+ companies.",
        ),
        (
            "Deep Tech & AI",
            "• Deep tech companies capture roughly one-third of the capital raised by female-founded startups.\n\
             • Data & AI founders cite funding (67 mentions) and slow adoption (47) as top bottlenecks.\n\
             • Health & life-science founders echo funding, adoption, and economic uncertainty challenges—filter Dealroom tags for precise counts.",
        ),
        (
            "Using the Index",
            "• Use Dealroom exports DR_FF_C_1 (female-founded VC) and DR_MC_C_5 (monthly capital) for charts.\n\
             • Funnel views reveal drop-off points across awareness, acceleration, and funding.\n\
             • Start from the 2025 Index landing page for methodology and download links.",
        ),
        (
            "AI Visionaries",
            "• Female Foundry’s AI incubator with Google Cloud for frontier AI founders.\n\
             • ‘Visit AI Visionaries’ shows cohorts, mentors, curriculum, and application windows.\n\
             • Offers tailored GTM support, mentor office hours, and showcase opportunities.",
        ),
        (
            "AI Hustle",
            "• Free monthly 1-hour clinic with Agata Nowicka (up to three founders).\n\
             • Tap the homepage ‘Sign Up’ CTA to request a slot.\n\
             • Ideal for quick GTM troubleshooting, warm intros, and accountability.",
        ),
        (
            "Sunday Newsletter",
            "• Weekly roundup covering funding news, founder tactics, and ecosystem signals.\n\
             • Use the homepage ‘Read’ button to browse the latest edition or subscribe.\n\
             • Designed for female founders, operators, and allies tracking European venture.",
        ),
        (
            "Join the community",
            "• 7,000+ founders, investors, and operators focused on female-led innovation.\n\
             • Click ‘Join the Community’ to request access to intros, events, and resources.\n\
             • Members tap curated deal flow, mentor sessions, and partner offers.",
        ),
        (
            "Campaigns",
            "• ‘Celebrating female founders’ spotlights stories you can feature or amplify.\n\
             • Use the ‘Watch all’ CTA to stream short films and social assets.\n\
             • Great for investor updates, internal culture decks, or event content.",
        ),
        (
            "Shop",
            "• Female Foundry Shop offers identity assets, merch, and partner gifting ideas.\n\
             • Linked from the site footer—ships worldwide with limited drops.\n\
             • Popular for event swag, partner onboarding, or community giveaways.",
        ),
        (
            "Contact",
            "• Email HELLO@FEMALEFOUNDRY.CO for partnerships or press.\n\
             • HQ: 11 Welbeck Street, W1G 9XZ, London (by appointment).\n\
             • Footer also links to About, Partners, Careers, and Privacy Policy.",
        ),
        (
            "Partners",
            "• Explore corporate and ecosystem partners via the footer link.\n\
             • Collaboration areas include scouting, thought leadership, and program support.\n\
             • Submit interest through the partner form for a follow-up call.",
        ),
        (
            "Media coverage",
            "• Featured in FT Adviser, Maddyness, tech.eu, UKTN, Sifted, Startups Magazine, TFN, and more.\n\
             • Logos appear above the partner grid for easy export to decks.\n\
             • Cite coverage to boost credibility with LPs, corporates, or press.",
        ),
    ])
});

/// Follow-up topics under a primary menu entry; empty for unknown labels.
pub fn secondary_options(primary: &str) -> &'static [&'static str] {
    SECONDARY_OPTIONS.get(primary).copied().unwrap_or(&[])
}

pub fn snippet(topic: &str) -> Option<&'static str> {
    SNIPPETS.get(topic).copied()
}
