use anyhow::Result;

use folio_core::{Portfolio, ProjectFilter};

pub fn run(portfolio: &Portfolio, category: Option<&str>) -> Result<()> {
    let filter = category.map(ProjectFilter::parse).unwrap_or_default();
    let projects: Vec<_> = portfolio.filtered_projects(&filter).collect();

    if projects.is_empty() {
        println!("No projects in '{}'.", filter.label());
        println!("\nCategories: {}", portfolio.categories().join(", "));
        return Ok(());
    }

    println!("Projects - {} ({}):\n", filter.label(), projects.len());

    for project in projects {
        let featured = if project.featured { " *" } else { "" };
        println!("  {}{} [{}]", project.title, featured, project.category);
        println!("    {}", project.description);
        if !project.tags.is_empty() {
            println!("    Tags: {}", project.tags.join(", "));
        }
        if let Some(url) = &project.live_url {
            println!("    Live: {}", url);
        }
        if let Some(url) = &project.repo_url {
            println!("    Code: {}", url);
        }
        println!();
    }

    Ok(())
}
