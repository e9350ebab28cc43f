//! Plain-text output for the terminal.

use services::{Dashboard, Profile, RoadmapCard, RoadmapDetail, RoadmapResources};
use tracker_core::model::Category;

const BAR_WIDTH: usize = 20;

fn bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn cards(cards: &[RoadmapCard]) {
    if cards.is_empty() {
        println!("  (no roadmaps)");
        return;
    }
    for card in cards {
        println!("  {} {:>3}%  {}  ({})", bar(card.percent), card.percent, card.title, card.id);
    }
}

pub fn dashboard(dashboard: &Dashboard) {
    println!("Overall progress {} {}%", bar(dashboard.overall_percent), dashboard.overall_percent);
    for category in Category::ALL {
        println!();
        println!("{}", category.label());
        cards(dashboard.cards(category));
    }
}

pub fn detail(detail: &RoadmapDetail) {
    let roadmap = &detail.roadmap;
    println!("{} ({})", roadmap.title, roadmap.category.label());
    if !roadmap.description.is_empty() {
        println!("{}", roadmap.description);
    }
    println!("Progress {} {}%", bar(detail.percent), detail.percent);

    for (label, items) in [
        ("Prerequisites", &roadmap.prerequisites),
        ("Tools", &roadmap.tools),
        ("Books", &roadmap.books),
    ] {
        if let Some(items) = items.as_ref().filter(|items| !items.is_empty()) {
            println!("{label}: {}", items.join(", "));
        }
    }

    for topic in &detail.topics {
        println!();
        println!("{} [{:?}]", topic.title, topic.level);
        for subtopic in &topic.subtopics {
            let mark = if subtopic.completed { "x" } else { " " };
            println!("  [{mark}] {}  ({})", subtopic.label, subtopic.id);
            if let Some(note) = &subtopic.note {
                println!("      note: {note}");
            }
        }
    }

    if detail.has_resources() {
        println!();
        println!("Learning resources available: tracker resources {}", roadmap.id);
    }
}

pub fn profile(profile: &Profile) {
    let stats = &profile.stats;
    println!(
        "Roadmaps completed: {}/{}",
        stats.completed_roadmaps, stats.total_roadmaps
    );
    println!(
        "Topics completed:   {}/{}",
        stats.completed_subtopics, stats.total_subtopics
    );
    println!("Average progress:   {}%", stats.average_percent);
    println!("Active roadmaps (7 days): {}", stats.learning_streak);
    for category in Category::ALL {
        let percent = profile.category_percent(category);
        println!("{:<14}{} {}%", category.label(), bar(percent), percent);
    }

    println!();
    println!("Top roadmaps");
    for top in &profile.top_roadmaps {
        println!(
            "  {:>3}%  {} ({}/{})",
            top.percent, top.title, top.completed, top.total
        );
    }

    println!();
    for goal in &profile.goals {
        println!("{}: {}/{}", goal.kind.label(), goal.current, goal.target);
    }

    println!();
    println!("Achievements");
    for achievement in &profile.achievements {
        let mark = if achievement.unlocked { "*" } else { " " };
        println!(
            "  [{mark}] {} - {} ({}/{})",
            achievement.kind.title(),
            achievement.kind.description(),
            achievement.current,
            achievement.target
        );
    }

    println!();
    println!("Recent activity");
    for entry in &profile.recent_activity {
        let when = entry
            .last_updated
            .map_or_else(|| "never".to_owned(), |at| at.format("%Y-%m-%d %H:%M").to_string());
        println!("  {when}  {}", entry.title);
    }
}

pub fn resources(loaded: &RoadmapResources) {
    println!("{} resources", loaded.title);
    if !loaded.resources.notes.is_empty() {
        println!();
        println!("Notes");
        for note in &loaded.resources.notes {
            println!("  {} by {}", note.title, note.author);
            println!("    {}", note.url);
            println!("    save as: {}", note.download_file_name());
        }
    }
    if !loaded.resources.videos.is_empty() {
        println!();
        println!("Videos");
        for video in &loaded.resources.videos {
            let duration = video.duration.as_deref().unwrap_or("");
            println!("  {} by {} {duration}", video.title, video.author);
            if let Some(url) = video.embed_url() {
                println!("    {url}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50).matches('#').count(), BAR_WIDTH / 2);
    }
}
