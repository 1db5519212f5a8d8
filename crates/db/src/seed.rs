//! Category seed catalog.
//!
//! The category table ships with a fixed catalog of 25 entries, inserted
//! once when the table is empty. Categories are never created through the
//! API.

use crate::entities::category;
use crate::repositories::CategoryRepository;
use blognest_common::{AppResult, IdGenerator};
use sea_orm::Set;

/// The fixed catalog of categories, `(name, description)` pairs.
pub const CATEGORY_CATALOG: [(&str, &str); 25] = [
    (
        "Personal Blog",
        "Life updates, stories, thoughts, and reflections from an individual.",
    ),
    (
        "Tech Blog",
        "Tutorials, news, and discussions around programming, gadgets, and tech trends.",
    ),
    (
        "Travel Blog",
        "Travel guides, itineraries, cultural experiences, and destination reviews.",
    ),
    (
        "Food Blog",
        "Recipes, cooking tips, restaurant reviews, and culinary experiences.",
    ),
    (
        "Finance Blog",
        "Personal finance, investing, saving tips, and budgeting.",
    ),
    (
        "Health & Fitness Blog",
        "Exercise routines, nutrition advice, wellness strategies.",
    ),
    (
        "Educational Blog",
        "Teach academic or skill-based topics (math, coding, languages, etc.).",
    ),
    (
        "Fashion Blog",
        "Outfit ideas, fashion trends, clothing reviews, and styling tips.",
    ),
    (
        "Parenting Blog",
        "Tips, experiences, and support for raising children.",
    ),
    (
        "DIY/Crafts Blog",
        "Step-by-step projects for home decor, art, or crafting.",
    ),
    (
        "Photography Blog",
        "Showcase photography, tutorials, gear reviews, and inspiration.",
    ),
    (
        "Lifestyle Blog",
        "A mix of daily life, routines, productivity, home, and personal development.",
    ),
    (
        "Productivity Blog",
        "Time management, goal-setting, tools, and personal effectiveness tips.",
    ),
    (
        "Gaming Blog",
        "Game reviews, news, guides, walkthroughs, and gaming culture.",
    ),
    (
        "Book/Reading Blog",
        "Book reviews, reading challenges, author insights, literary discussions.",
    ),
    (
        "Career/Job Blog",
        "Resume tips, interview strategies, workplace advice, career paths.",
    ),
    (
        "Coding/Dev Blog",
        "Tutorials, tools, frameworks, and software engineering topics.",
    ),
    (
        "Environmental Blog",
        "Climate change, sustainability, eco-living, and green tech.",
    ),
    (
        "Political/Opinion Blog",
        "Commentary, analysis, or discussion on politics and current affairs.",
    ),
    (
        "Pop Culture Blog",
        "TV, movies, music, celebrity news, fandom theories.",
    ),
    (
        "Mental Health Blog",
        "Coping strategies, therapy insights, self-care advice.",
    ),
    (
        "History Blog",
        "Deep dives into historical events, people, and timelines.",
    ),
    (
        "Marketing/SEO Blog",
        "Digital marketing strategies, content SEO, analytics, advertising tips.",
    ),
    (
        "Nonprofit/Cause Blog",
        "Promote social good, awareness, fundraising, or volunteering opportunities.",
    ),
    (
        "Startup/Entrepreneur Blog",
        "Building a business, startup journeys, fundraising, and innovation strategies.",
    ),
];

/// Insert the category catalog when the table is empty.
///
/// Returns the number of categories inserted (zero when already seeded).
pub async fn seed_categories(repo: &CategoryRepository) -> AppResult<usize> {
    if repo.count().await? > 0 {
        return Ok(0);
    }

    let id_gen = IdGenerator::new();
    for (name, description) in CATEGORY_CATALOG {
        let model = category::ActiveModel {
            id: Set(id_gen.generate()),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
        };
        repo.create(model).await?;
    }

    tracing::info!(count = CATEGORY_CATALOG.len(), "Seeded category catalog");
    Ok(CATEGORY_CATALOG.len())
}
