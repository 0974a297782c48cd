//! # Page Rendering
//!
//! Renders the single café page from the catalog and the visitor's
//! [`FilterState`]. Every interaction (category tab, flavor button, search
//! input) is a plain link or GET form carrying the complete state, so the
//! page is recomputed from scratch on each change.
//!
//! ## Layout
//!
//! - header with contact links
//! - hero
//! - "Meet the Barista" about section
//! - menu heading (`#menu`), flavor buttons, category tabs and search
//! - project grid (`#projects`)
//! - footer (`#about`)

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::filter::{apply, FilterState, Selection};
use crate::models::{Category, Flavor, ProjectRecord};
use crate::profile::Profile;
use crate::quick_jump::jump_target;

const RECIPE_FALLBACK: &str = "Case study coming soon. Ask me about the recipe details!";
const SEARCH_PLACEHOLDER: &str = "Search drinks: project, tech, tag…";
const HERO_IMAGE: &str = "/hero.jpeg";
const POSTER_IMAGE: &str = "/about-side.png";
const ON_IMAGE_ERROR: &str = "this.onerror=null;this.classList.add('is-fallback')";

/// Answers whether a site-relative asset can actually be served
pub trait AssetProbe {
    fn has_asset(&self, path: &str) -> bool;
}

/// Everything the page needs besides the filter state
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub profile: &'a Profile,
    pub catalog: &'a Catalog,
    pub assets: &'a dyn AssetProbe,
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Page URL for a filter state. Default fields are omitted.
pub fn state_href(state: &FilterState) -> String {
    let mut params = Vec::new();
    let query = state.query.trim();
    if !query.is_empty() {
        params.push(format!("q={}", urlencoding::encode(query)));
    }
    if let Selection::Only(category) = state.active_category {
        params.push(format!("category={}", urlencoding::encode(category.label())));
    }
    if let Selection::Only(flavor) = state.active_flavor {
        params.push(format!("flavor={}", flavor.key()));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Render the full HTML document
pub fn render_page(ctx: &PageContext<'_>, state: &FilterState) -> String {
    let visible = apply(ctx.catalog.projects(), state);

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
    out.push_str(&render_head(ctx.config));
    out.push_str("<body class=\"font-sans text-ink\">\n<div class=\"cafe-wall\"></div>\n");
    out.push_str("<main class=\"page\">\n");
    out.push_str(&render_header(ctx.config, ctx.profile));
    out.push_str(&render_hero(ctx.config, ctx.assets));
    out.push_str(&render_about(ctx.profile, ctx.assets));
    out.push_str(&render_menu_heading());
    out.push_str(&render_flavor_buttons(state, &visible));
    out.push_str(&render_controls(ctx.catalog, state));
    out.push_str(&render_grid(ctx.assets, &visible));
    out.push_str("<div class=\"divider\"></div>\n");
    out.push_str("<footer id=\"about\" class=\"footer\"></footer>\n");
    out.push_str("</main>\n</body>\n</html>\n");

    tracing::debug!(
        visible = visible.len(),
        total = ctx.catalog.len(),
        query = %state.query,
        category = %state.active_category,
        flavor = %state.active_flavor,
        "Rendered menu page"
    );
    out
}

fn render_head(config: &SiteConfig) -> String {
    format!(
        "<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <link rel=\"canonical\" href=\"{base}\">\n\
         <link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">\n\
         <link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css2?family=Caveat:wght@400;600;700&family=Noto+Sans&family=Playfair+Display:wght@500;600;700&display=swap\">\n\
         <link rel=\"stylesheet\" href=\"/style.css\">\n\
         </head>\n",
        title = escape_html(&config.title),
        description = escape_html(&config.description),
        base = escape_html(&crate::site::normalize_base_url(&config.base_url)),
    )
}

fn render_header(config: &SiteConfig, profile: &Profile) -> String {
    format!(
        "<header class=\"cafe-header\">\n\
         <div class=\"container header-row\">\n\
         <div class=\"cafe-hand brand\">{title}</div>\n\
         <nav class=\"header-links\">\n\
         <a href=\"{mailto}\">Email</a>\n\
         <a href=\"{github}\" target=\"_blank\" rel=\"noreferrer\">GitHub</a>\n\
         <a href=\"{linkedin}\" target=\"_blank\" rel=\"noreferrer\">LinkedIn</a>\n\
         </nav>\n\
         </div>\n\
         </header>\n",
        title = escape_html(&config.title),
        mailto = escape_html(&profile.mailto()),
        github = escape_html(&profile.github),
        linkedin = escape_html(&profile.linkedin),
    )
}

/// Decorative image, left out entirely when the asset is known to be missing
fn decorative_image(assets: &dyn AssetProbe, src: &str, class: &str, alt: &str, lazy: bool) -> String {
    if !assets.has_asset(src) {
        tracing::debug!(src, "Decorative image not available, skipping");
        return String::new();
    }
    format!(
        "<img class=\"{}\" src=\"{}\" alt=\"{}\"{} onerror=\"{}\">\n",
        class,
        escape_html(src),
        escape_html(alt),
        if lazy { " loading=\"lazy\"" } else { "" },
        ON_IMAGE_ERROR,
    )
}

fn render_hero(config: &SiteConfig, assets: &dyn AssetProbe) -> String {
    format!(
        "<section class=\"hero\">\n\
         {image}\
         <div class=\"hero-glaze\"></div>\n\
         <div class=\"hero-copy\">\n\
         <h1 class=\"cafe-hand\">Welcome to {title}</h1>\n\
         <p>{description}</p>\n\
         </div>\n\
         </section>\n",
        image = decorative_image(assets, HERO_IMAGE, "hero-image", "Café welcome", false),
        title = escape_html(&config.title),
        description = escape_html(&config.description),
    )
}

fn render_about(profile: &Profile, assets: &dyn AssetProbe) -> String {
    let (lead, rest) = profile.intro_parts();

    let mut out = String::new();
    out.push_str("<section class=\"container about\">\n<div class=\"about-card\">\n");
    out.push_str("<div class=\"about-text\">\n");
    out.push_str("<h2 class=\"heading-serif\">Meet the Barista</h2>\n");
    out.push_str(&format!(
        "<p><strong>{}</strong>{}</p>\n",
        escape_html(lead),
        escape_html(rest)
    ));
    out.push_str("<ol class=\"highlights\">\n");
    for item in &profile.highlights {
        out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
    }
    out.push_str("</ol>\n");

    out.push_str("<div class=\"about-buttons\">\n");
    out.push_str(&format!(
        "<a class=\"button button-primary\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Résumé (PDF)</a>\n",
        escape_html(&profile.resume_url)
    ));
    out.push_str(&format!(
        "<a class=\"button\" href=\"{}\">Email</a>\n",
        escape_html(&profile.mailto())
    ));
    out.push_str(&format!(
        "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">GitHub</a>\n",
        escape_html(&profile.github)
    ));
    out.push_str(&format!(
        "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">LinkedIn</a>\n",
        escape_html(&profile.linkedin)
    ));
    out.push_str("</div>\n</div>\n");

    out.push_str("<div class=\"about-poster\">\n");
    out.push_str(&decorative_image(
        assets,
        POSTER_IMAGE,
        "poster-image",
        "Welcome to my Café poster",
        true,
    ));
    out.push_str("<span class=\"poster-label\">house blend</span>\n</div>\n");
    out.push_str("</div>\n</section>\n");
    out
}

fn render_menu_heading() -> String {
    "<section id=\"menu\" class=\"container menu-heading\">\n\
     <h2>Today’s Menu</h2>\n\
     <p>Drinks map to projects. Pick a flavor, open the recipe to see the case study.</p>\n\
     </section>\n"
        .to_string()
}

fn render_flavor_buttons(state: &FilterState, visible: &[&ProjectRecord]) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"container flavor-buttons\">\n");

    for flavor in Flavor::all() {
        let mut picked = state.clone();
        picked.set_flavor(Selection::Only(flavor));
        let active = if state.active_flavor == Selection::Only(flavor) {
            " is-active"
        } else {
            ""
        };

        out.push_str(&format!(
            "<span class=\"flavor-pick\">\
             <a class=\"flavor-button {badge}{active}\" href=\"{href}#projects\">\
             <span class=\"emoji\">{emoji}</span> <span class=\"menu-heading\">{label}</span></a>",
            badge = flavor.badge_class(),
            active = active,
            href = escape_html(&state_href(&picked)),
            emoji = flavor.emoji(),
            label = escape_html(flavor.label()),
        ));
        if let Some(target) = jump_target(visible, flavor) {
            out.push_str(&format!(
                "<a class=\"flavor-jump\" href=\"{}\" title=\"Jump to the first {} on the menu\">↓</a>",
                escape_html(&target.anchor),
                escape_html(flavor.label()),
            ));
        }
        out.push_str("</span>\n");
    }

    let mut all = state.clone();
    all.set_flavor(Selection::All);
    out.push_str(&format!(
        "<a class=\"flavor-button flavor-all{}\" href=\"{}#projects\"><span class=\"menu-heading\">All drinks</span></a>\n",
        if state.active_flavor == Selection::All {
            " is-active"
        } else {
            ""
        },
        escape_html(&state_href(&all)),
    ));

    out.push_str("</section>\n");
    out
}

fn render_controls(catalog: &Catalog, state: &FilterState) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"container controls\">\n");

    out.push_str("<nav class=\"category-tabs\" aria-label=\"Categories\">\n");
    let tabs = std::iter::once(Selection::All)
        .chain(catalog.categories().into_iter().map(Selection::Only));
    for tab in tabs {
        let mut picked = state.clone();
        picked.set_category(tab);
        let class = if state.active_category == tab {
            "tab is-active"
        } else {
            "tab"
        };
        out.push_str(&format!(
            "<a class=\"{}\" href=\"{}#projects\">{}</a>\n",
            class,
            escape_html(&state_href(&picked)),
            escape_html(&tab.to_string()),
        ));
    }
    out.push_str("</nav>\n");

    out.push_str("<form class=\"search\" method=\"get\" action=\"/#projects\" role=\"search\">\n");
    if let Selection::Only(category) = state.active_category {
        out.push_str(&hidden_input("category", category.label()));
    }
    if let Selection::Only(flavor) = state.active_flavor {
        out.push_str(&hidden_input("flavor", flavor.key()));
    }
    // Each keystroke resubmits; the caret is restored after the reload.
    out.push_str(&format!(
        "<input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"{}\" \
         oninput=\"this.form.requestSubmit()\" \
         onfocus=\"this.setSelectionRange(this.value.length,this.value.length)\"{}>\n",
        escape_html(&state.query),
        escape_html(SEARCH_PLACEHOLDER),
        if state.query.is_empty() {
            ""
        } else {
            " autofocus"
        },
    ));
    out.push_str("</form>\n");

    out.push_str("</section>\n");
    out
}

fn hidden_input(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        name,
        escape_html(value)
    )
}

fn render_grid(assets: &dyn AssetProbe, visible: &[&ProjectRecord]) -> String {
    let mut out = String::new();
    out.push_str("<section id=\"projects\" class=\"container projects\">\n");
    if visible.is_empty() {
        out.push_str(
            "<p class=\"empty-menu\">No drinks match that order. Try another flavor or clear the search.</p>\n",
        );
    } else {
        out.push_str("<div class=\"grid\">\n");
        for project in visible {
            out.push_str(&render_card(assets, project));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

/// One menu card
pub fn render_card(assets: &dyn AssetProbe, p: &ProjectRecord) -> String {
    let flavor = p.flavor_key;

    let mut out = String::new();
    out.push_str(&format!(
        "<article id=\"{id}\" data-drink=\"{drink}\" data-category=\"{category}\" class=\"menu-card\" style=\"--stroke: {stroke}\">\n",
        id = escape_html(&p.id),
        drink = flavor.key(),
        category = escape_html(category_slug(p.category)),
        stroke = flavor.stroke(),
    ));

    if let Some(image) = p.image_ref() {
        out.push_str(&render_polaroid(assets, image, &p.name));
    }

    out.push_str("<div class=\"card-body\">\n");
    out.push_str(&format!(
        "<div class=\"drink-label cafe-hand\"><span>{}</span> <span>{}</span></div>\n",
        flavor.emoji(),
        escape_html(flavor.label())
    ));
    out.push_str(&format!("<h3 class=\"card-title\">{}</h3>\n", escape_html(&p.name)));
    out.push_str(&format!(
        "<p class=\"card-description\">{}</p>\n",
        escape_html(&p.description)
    ));

    if !p.technologies.is_empty() {
        out.push_str("<div class=\"tech-tags\">\n");
        for tech in &p.technologies {
            out.push_str(&format!("<span class=\"tag\">{}</span>\n", escape_html(tech)));
        }
        out.push_str("</div>\n");
    }
    if !p.badges.is_empty() {
        out.push_str("<div class=\"badges\">\n");
        for badge in &p.badges {
            out.push_str(&format!("<span class=\"pill\">{}</span>\n", escape_html(badge)));
        }
        out.push_str("</div>\n");
    }
    if !p.impact.trim().is_empty() {
        out.push_str(&format!("<p class=\"impact\">{}</p>\n", escape_html(&p.impact)));
    }

    out.push_str("<div class=\"card-links\">\n");
    out.push_str(&external_link(&p.links.primary, "GitHub"));
    if let Some(writeup) = p.links.writeup.as_deref().filter(|u| !u.trim().is_empty()) {
        out.push_str(&external_link(writeup, "Write-up"));
    }
    if let Some(demo) = p.links.demo.as_deref().filter(|u| !u.trim().is_empty()) {
        out.push_str(&external_link(demo, "Demo"));
    }
    out.push_str("</div>\n");

    out.push_str(&format!(
        "<details class=\"recipe\">\n<summary>Recipe (details)</summary>\n\
         <h4 class=\"cafe-hand\">{} — Recipe</h4>\n<p>{}</p>\n\
         <p class=\"served\">Served warm with ❤️</p>\n</details>\n",
        escape_html(&p.name),
        escape_html(p.long_description.as_deref().unwrap_or(RECIPE_FALLBACK)),
    ));

    out.push_str("</div>\n</article>\n");
    out
}

/// Polaroid photo. Assets known to be missing go straight to the dimmed
/// rendering; anything else switches to it if the browser fails to load it.
fn render_polaroid(assets: &dyn AssetProbe, image: &str, alt: &str) -> String {
    let img = if assets.has_asset(image) {
        format!(
            "<img class=\"polaroid-img\" src=\"{}\" alt=\"{}\" width=\"144\" height=\"112\" loading=\"lazy\" \
             onerror=\"{}\">",
            escape_html(image),
            escape_html(alt),
            ON_IMAGE_ERROR,
        )
    } else {
        tracing::debug!(image, "Image asset not available, rendering fallback");
        format!(
            "<img class=\"polaroid-img is-fallback\" src=\"{}\" alt=\"{}\" width=\"144\" height=\"112\">",
            escape_html(image),
            escape_html(alt)
        )
    };

    format!(
        "<div class=\"polaroid\"><div class=\"tape\"></div>{}</div>\n",
        img
    )
}

fn external_link(href: &str, label: &str) -> String {
    format!(
        "<a class=\"link-icon\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>\n",
        escape_html(href),
        escape_html(label)
    )
}

fn category_slug(category: Category) -> &'static str {
    match category {
        Category::Pipelines => "pipelines",
        Category::Markets => "markets",
        Category::Analytics => "analytics",
        Category::Etl => "etl",
        Category::Research => "research",
    }
}
