use crate::{emit_success, OutputMode};
use cookshelf::config::{write_config, ShelfConfig};
use cookshelf::storage::CatalogStore;
use cookshelf::ui::{self, Icons};
use cookshelf::{Analytics, Cookbook, NewCookbook, QueryEngine, TagLinker};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Tags given to the first seeded cookbook
pub const SAMPLE_TAGS: [&str; 3] = ["gluten-free", "plant-based", "artisanal"];

/// The demo collection inserted by `seed`
pub fn sample_cookbooks() -> Vec<NewCookbook> {
    vec![
        NewCookbook::new("Foraged & Found: A Guide to Pretending You Know About Mushrooms", "Oak Wavelength")
            .year(2023).rating(5).instagram_worthy(true).cover_color("Forest Green"),
        NewCookbook::new("Small Batch: 50 Recipes You Will Never Actually Make", "Sage Moonbeam")
            .year(2022).rating(4).instagram_worthy(true).cover_color("Raw Linen"),
        NewCookbook::new("The Artistic Toast: Advanced Avocado Techniques", "River Wildflower")
            .year(2023).rating(5).instagram_worthy(true).cover_color("Recycled Brown"),
        NewCookbook::new("Fermented Everything", "Jim Kombucha")
            .year(2021).rating(3).instagram_worthy(true).cover_color("Denim"),
        NewCookbook::new("The Deconstructed Sandwich: Making Simple Things Complicated", "Juniper Vinegar-Smith")
            .year(2023).rating(5).instagram_worthy(true).cover_color("Beige"),
    ]
}

pub fn run_init(
    store: &CatalogStore,
    output_mode: OutputMode,
    config: Option<(PathBuf, ShelfConfig)>,
    force: bool,
) -> anyhow::Result<()> {
    store.ensure_schema()?;
    let config_path = match config {
        Some((path, config)) => {
            write_config(&path, &config, force)?;
            Some(path)
        }
        None => None,
    };

    if output_mode.is_human() {
        ui::success("Catalog tables ready");
        if let Some(path) = store.path() {
            ui::info("Database", &path.display().to_string());
        }
        if let Some(path) = &config_path {
            ui::info("Config", &path.display().to_string());
        }
    } else {
        let data = serde_json::json!({
            "database": store.path().map(|p| p.display().to_string()),
            "config": config_path.map(|p| p.display().to_string()),
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

pub fn run_add(
    store: &CatalogStore,
    output_mode: OutputMode,
    cookbook: &NewCookbook,
    tags: &[String],
) -> anyhow::Result<()> {
    let id = store.insert_cookbook(cookbook)?;
    let link_stats = if tags.is_empty() {
        None
    } else {
        Some(TagLinker::new(store).attach_tags(id, tags)?)
    };

    if output_mode.is_human() {
        ui::success(&format!("Successfully curated cookbook with the id: {}", id));
        if let Some(stats) = &link_stats {
            ui::info("Tags", &format!("{} attached ({} new)", stats.requested, stats.tags_created));
        }
    } else {
        let data = serde_json::json!({ "id": id, "tags": link_stats });
        emit_success(output_mode, "add", data)?;
    }
    Ok(())
}

pub fn run_tag(
    store: &CatalogStore,
    output_mode: OutputMode,
    id: i64,
    names: &[String],
) -> anyhow::Result<()> {
    let stats = TagLinker::new(store).attach_tags(id, names)?;

    if output_mode.is_human() {
        ui::success(&format!("Successfully added tags to cookbook {}", id));
        print!("{}", stats);
    } else {
        emit_success(output_mode, "tag", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}

pub fn run_list(store: &CatalogStore, output_mode: OutputMode, instagram: bool) -> anyhow::Result<()> {
    let books = if instagram {
        QueryEngine::new(store).instagram_worthy()?
    } else {
        store.list_cookbooks()?
    };

    if output_mode.is_human() {
        if instagram {
            ui::header(&format!("{} Instagram-worthy shelf", Icons::CAMERA));
        } else {
            ui::header("Your carefully curated collection");
        }
        print_books(&books);
    } else {
        emit_success(output_mode, "list", serde_json::to_value(&books)?)?;
    }
    Ok(())
}

pub fn run_tags(store: &CatalogStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let tags = TagLinker::new(store).list_tags()?;

    if output_mode.is_human() {
        ui::header(&format!("{} Tags", Icons::TAG));
        if tags.is_empty() {
            println!("{}", ui::dim("No tags yet."));
        }
        for tag in &tags {
            println!("  {}", tag.name.style(ui::theme().tag.clone()));
        }
    } else {
        emit_success(output_mode, "tags", serde_json::to_value(&tags)?)?;
    }
    Ok(())
}

pub fn run_show(store: &CatalogStore, output_mode: OutputMode, id: i64) -> anyhow::Result<()> {
    let Some(book) = store.get_cookbook(id)? else {
        anyhow::bail!("No cookbook with id {}", id);
    };
    let tags = TagLinker::new(store).tags_for(id)?;

    if output_mode.is_human() {
        ui::header(&book.title);
        ui::summary_row("Author:", &book.author);
        ui::summary_row("Published:", &book.year_published.map(|y| y.to_string()).unwrap_or_default());
        ui::summary_row(
            "Aesthetic Rating:",
            &ui::rating_glyphs(book.aesthetic_rating)
                .style(ui::theme().rating_style(book.aesthetic_rating))
                .to_string(),
        );
        ui::summary_row("Instagram Worthy:", ui::instagram_label(book.instagram_worthy));
        ui::summary_row("Cover Color:", book.cover_color.as_deref().unwrap_or_default());
        let names: Vec<_> = tags.iter().map(|t| t.name.style(ui::theme().tag.clone()).to_string()).collect();
        ui::summary_row(&format!("{} Tags:", Icons::TAG), &names.join(", "));
    } else {
        let data = serde_json::json!({ "cookbook": book, "tags": tags });
        emit_success(output_mode, "show", data)?;
    }
    Ok(())
}

pub fn run_top(store: &CatalogStore, output_mode: OutputMode, min_rating: i64) -> anyhow::Result<()> {
    let books = QueryEngine::new(store).find_by_minimum_rating(min_rating)?;

    if output_mode.is_human() {
        ui::header(&format!("{} Cookbooks rated {} or higher", Icons::STAR, min_rating));
        print_books(&books);
    } else {
        emit_success(output_mode, "top", serde_json::to_value(&books)?)?;
    }
    Ok(())
}

pub fn run_tagged(store: &CatalogStore, output_mode: OutputMode, name: &str) -> anyhow::Result<()> {
    let books = QueryEngine::new(store).find_by_tag(name)?;

    if output_mode.is_human() {
        ui::header(&format!("{} Tagged '{}'", Icons::TAG, name));
        print_books(&books);
    } else {
        emit_success(output_mode, "tagged", serde_json::to_value(&books)?)?;
    }
    Ok(())
}

pub fn run_analytics(store: &CatalogStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let report = Analytics::new(store).report()?;

    if output_mode.is_human() {
        ui::header(&format!("{} Collection analytics", Icons::STATS));
        ui::info("Average Aesthetic Rating", &ui::format_average(report.average_rating));

        ui::section("Aesthetic Trends by Year");
        if report.trends.is_empty() {
            println!("{}", ui::dim("No cookbooks yet."));
        } else {
            println!("{}", ui::trend_table(&report.trends));
        }

        ui::section("Gaps in Your Collection (Years with Fewer than 2 Cookbooks)");
        if report.gaps.is_empty() {
            println!("{}", ui::dim("No gaps."));
        }
        for year in &report.gaps {
            println!("{} Year: {}", Icons::CALENDAR, year.style(ui::theme().gap.clone()));
        }
    } else {
        emit_success(output_mode, "analytics", serde_json::to_value(&report)?)?;
    }
    Ok(())
}

pub fn run_seed(store: &CatalogStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let linker = TagLinker::new(store);
    let mut ids = Vec::new();

    for cookbook in sample_cookbooks() {
        let id = store.insert_cookbook(&cookbook)?;
        if ids.is_empty() {
            linker.attach_tags(id, SAMPLE_TAGS)?;
        }
        ids.push(id);
    }

    if output_mode.is_human() {
        ui::success(&format!("{} Curated {} sample cookbooks", Icons::SPARKLE, ids.len()));
        ui::info("Ids", &format!("{:?}", ids));
    } else {
        emit_success(output_mode, "seed", serde_json::json!({ "ids": ids }))?;
    }
    Ok(())
}

pub fn run_stats(store: &CatalogStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = store.stats()?;

    if output_mode.is_human() {
        if let Some(path) = store.path() {
            ui::header(&format!("{} Cookshelf Statistics ({})", Icons::DATABASE, path.display()));
        }
        let cookbooks = stats.cookbooks.to_string();
        let tags = stats.tags.to_string();
        let links = stats.links.to_string();
        println!(
            "{}",
            ui::stats_table(&[("Cookbooks", cookbooks.as_str()), ("Tags", tags.as_str()), ("Tag links", links.as_str())])
        );
    } else {
        emit_success(output_mode, "stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}

fn print_books(books: &[Cookbook]) {
    if books.is_empty() {
        println!("{} {}", Icons::CROSS, ui::dim("No cookbooks found."));
    } else {
        println!("{}", ui::cookbook_table(books));
    }
}
