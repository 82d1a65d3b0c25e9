//! Template engine for rendering the page.

use minijinja::{context, Environment, Value};

use mms_components::{NavigationBar, SectionKind};
use mms_content::{Catalog, Company};

/// Context for rendering the page shell.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Document title
    pub title: String,
    /// Meta description
    pub description: String,
    /// Variant name, used as a body class
    pub variant: String,
    /// Base URL
    pub base_url: String,
    /// Rendered navigation bar
    pub nav: String,
    /// Rendered sections in document order
    pub sections: Vec<String>,
    /// Paths to extra CSS stylesheets
    pub styles: Vec<String>,
    /// Extra script URLs (the dev server injects its reload client here)
    pub scripts: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("href", href);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("Failed to add template {}: {}", name, e));
        }

        Self { env }
    }

    /// Render the navigation bar in its current state.
    pub fn render_nav(
        &self,
        nav: &NavigationBar,
        company: &Company,
        base_url: &str,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("nav.html")?;
        let state = nav.state();

        tmpl.render(context! {
            base_url => base_url,
            logo => &company.logo,
            short_name => &company.short_name,
            state => state.name(),
            expanded => state.is_expanded(),
            links => nav.links(),
            mobile_links => nav.mobile_links(),
        })
    }

    /// Render one content section.
    pub fn render_section(
        &self,
        kind: SectionKind,
        catalog: &Catalog,
        base_url: &str,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(kind.template())?;

        tmpl.render(context! {
            base_url => base_url,
            anchor => kind.anchor().map(|a| a.id()),
            ..Value::from_serialize(kind.data(catalog))
        })
    }

    /// Render the page shell around pre-rendered navigation and sections.
    pub fn render_page(&self, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;

        tmpl.render(context! {
            title => &context.title,
            description => &context.description,
            variant => &context.variant,
            base_url => &context.base_url,
            nav => &context.nav,
            sections => &context.sections,
            styles => &context.styles,
            scripts => &context.scripts,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a URL for an attribute value, leaving `/` and `:` readable.
fn href(value: &str) -> Value {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Value::from_safe_string(out)
}

const TEMPLATES: &[(&str, &str)] = &[
    ("page.html", PAGE_TEMPLATE),
    ("nav.html", NAV_TEMPLATE),
    ("sections/hero.html", HERO_TEMPLATE),
    ("sections/trust_stats.html", TRUST_STATS_TEMPLATE),
    ("sections/products.html", PRODUCTS_TEMPLATE),
    ("sections/bulk_order.html", BULK_ORDER_TEMPLATE),
    ("sections/services.html", SERVICES_TEMPLATE),
    ("sections/testimonials.html", TESTIMONIALS_TEMPLATE),
    ("sections/payment_terms.html", PAYMENT_TERMS_TEMPLATE),
    ("sections/about.html", ABOUT_TEMPLATE),
    ("sections/contact.html", CONTACT_TEMPLATE),
    ("sections/team.html", TEAM_TEMPLATE),
    ("sections/footer.html", FOOTER_TEMPLATE),
];

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="description" content="{{ description }}">
  <title>{{ title }}</title>
  {% for style in styles %}<link rel="stylesheet" href="{{ style|href }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url|href }}assets/main.css">
</head>
<body class="variant-{{ variant }}">
  {{ nav | safe }}
  {% for section in sections %}
  {{ section | safe }}
  {% endfor %}
  <script src="{{ base_url|href }}assets/main.js"></script>
  {% for script in scripts %}<script src="{{ script|href }}"></script>
  {% endfor %}
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<nav class="site-nav" data-nav data-state="{{ state }}">
  <div class="container nav-bar">
    <a href="#home" class="nav-logo">
      <img src="{{ base_url|href }}assets/{{ logo|href }}" alt="{{ short_name }} Logo">
    </a>
    <div class="nav-links">
    {% for link in links %}
      <a href="{{ link.href|href }}" class="nav-link">{{ link.label }}</a>
    {% endfor %}
    </div>
    <button type="button" class="nav-toggle" data-nav-toggle aria-controls="mobile-menu" aria-expanded="{{ expanded }}" aria-label="{% if expanded %}Close menu{% else %}Open menu{% endif %}">
      <span class="nav-toggle-icon" aria-hidden="true">{% if expanded %}&times;{% else %}&#9776;{% endif %}</span>
    </button>
  </div>
  {% if mobile_links %}
  <div class="mobile-menu" id="mobile-menu" data-nav-panel>
  {% for link in mobile_links %}
    <a href="{{ link.href|href }}" class="mobile-link">{{ link.label }}</a>
  {% endfor %}
  </div>
  {% endif %}
</nav>"##;

const HERO_TEMPLATE: &str = r##"<section id="{{ anchor }}" class="hero{% if background_image %} hero-image{% endif %}"{% if background_image %} style="background-image: url('{{ base_url|href }}assets/{{ background_image|href }}')"{% endif %}>
  <div class="container">
    <div class="hero-text">
      <h2>{{ hero.heading }}</h2>
      <p class="lead">{{ hero.lead }}</p>
      <div class="actions">
        <a href="#products" class="button button-primary">View Products</a>
        <a href="#contact" class="button button-outline">Contact Us</a>
      </div>
    </div>
    <div class="card mission">
      <h3>{{ hero.mission_title }}</h3>
      <p>{{ hero.mission }}</p>
    </div>
  </div>
</section>"##;

const TRUST_STATS_TEMPLATE: &str = r##"<section class="trust-stats">
  <div class="container stats-grid">
  {% for stat in stats %}
    <div class="stat">
      <span class="stat-value">{{ stat.value }}</span>
      <span class="stat-label">{{ stat.label }}</span>
    </div>
  {% endfor %}
  </div>
</section>"##;

const PRODUCTS_TEMPLATE: &str = r##"<section id="{{ anchor }}" class="section">
  <div class="container">
    <header class="section-header">
      <h2>Our Products</h2>
      <p>Comprehensive selection of building materials for all your construction needs</p>
    </header>
    <div class="grid grid-3">
    {% for category in categories %}
      <article class="card product-category">
        <h3>{{ category.name }}</h3>
        <p>{{ category.description }}</p>
        <ul class="check-list">
        {% for item in category.items %}
          <li>{{ item }}</li>
        {% endfor %}
        </ul>
      </article>
    {% endfor %}
    </div>
  </div>
</section>"##;

const BULK_ORDER_TEMPLATE: &str = r##"<section id="{{ anchor }}" class="section section-muted">
  <div class="container narrow">
    <header class="section-header">
      <h2>{{ content.heading }}</h2>
      <p>{{ content.lead }}</p>
    </header>
    <form class="card bulk-order-form" data-bulk-order>
    {% for field in fields %}
      <div class="field">
        <label for="{{ field.name }}">{{ field.label }}{% if field.required %} <span class="required">*</span>{% endif %}</label>
        {% if field.kind == "textarea" %}
        <textarea id="{{ field.name }}" name="{{ field.name }}" rows="4" placeholder="{{ field.placeholder }}"{% if field.required %} required aria-required="true"{% endif %}></textarea>
        {% else %}
        <input id="{{ field.name }}" name="{{ field.name }}" type="{{ field.kind }}" placeholder="{{ field.placeholder }}"{% if field.required %} required aria-required="true"{% endif %}>
        {% endif %}
      </div>
    {% endfor %}
      <div class="actions">
      {% for handoff in handoffs %}
        <a href="{{ handoff.href|href }}" class="button button-{{ handoff.channel }}" data-handoff target="_blank" rel="noopener noreferrer">{{ handoff.label }}</a>
      {% endfor %}
      </div>
    </form>
  </div>
</section>"##;

const SERVICES_TEMPLATE: &str = r##"<section id="{{ anchor }}" class="section section-muted">
  <div class="container">
    <header class="section-header">
      <h2>Our Services</h2>
      <p>More than just materials - complete solutions for your construction projects</p>
    </header>
    <div class="grid grid-2">
    {% for service in services %}
      <article class="card service">
        <h3>{{ service.title }}</h3>
        <p>{{ service.description }}</p>
        <ul class="check-list">
        {% for feature in service.features %}
          <li>{{ feature }}</li>
        {% endfor %}
        </ul>
      </article>
    {% endfor %}
    </div>
  </div>
</section>"##;

const TESTIMONIALS_TEMPLATE: &str = r##"<section class="section testimonials">
  <div class="container">
    <header class="section-header">
      <h2>What Our Clients Say</h2>
    </header>
    <div class="grid grid-3">
    {% for testimonial in testimonials %}
      <figure class="card testimonial">
        <blockquote>&ldquo;{{ testimonial.text }}&rdquo;</blockquote>
        <figcaption>
          <span class="person">{{ testimonial.person }}</span>
          <span class="role">{{ testimonial.role }}</span>
          <span class="company">{{ testimonial.company }}</span>
        </figcaption>
      </figure>
    {% endfor %}
    </div>
  </div>
</section>"##;

const PAYMENT_TERMS_TEMPLATE: &str = r##"<section class="section section-muted payment-terms">
  <div class="container">
    <header class="section-header">
      <h2>Payment Options</h2>
      <p>Flexible ways to pay for orders of every size</p>
    </header>
    <div class="grid grid-3">
    {% for option in options %}
      <article class="card payment-option">
        <h3>{{ option.title }}</h3>
        <p>{{ option.description }}</p>
        <ul class="check-list">
        {% for term in option.terms %}
          <li>{{ term }}</li>
        {% endfor %}
        </ul>
      </article>
    {% endfor %}
    </div>
  </div>
</section>"##;

const ABOUT_TEMPLATE: &str = r##"<section id="{{ anchor }}" class="section">
  <div class="container narrow">
    <h2 class="centered">{{ about.title }}</h2>
    {% for paragraph in about.paragraphs %}
    <p{% if loop.first %} class="lead"{% endif %}>{{ paragraph }}</p>
    {% endfor %}
    <div class="highlights">
      <h3>{{ about.highlights_title }}</h3>
      <ul class="check-list">
      {% for highlight in about.highlights %}
        <li><strong>{{ highlight.title }}:</strong> {{ highlight.text }}</li>
      {% endfor %}
      </ul>
    </div>
    <p>{{ about.closing }}</p>
  </div>
</section>"##;

const CONTACT_TEMPLATE: &str = r##"<section id="{{ anchor }}" class="section section-muted">
  <div class="container">
    <header class="section-header">
      <h2>Contact Us</h2>
      <p>Get in touch for quotes, orders, or inquiries</p>
    </header>
    <div class="grid grid-2">
      <div class="card contact-details">
        <h3>Get In Touch</h3>
        <div class="contact-item">
          <h4>Phone</h4>
          <a href="{{ phone.href|href }}">{{ phone.display }}</a>
        </div>
        <div class="contact-item">
          <h4>WhatsApp</h4>
          <a href="{{ whatsapp.href|href }}" target="_blank" rel="noopener noreferrer">{{ whatsapp.display }}</a>
        </div>
        <div class="contact-item">
          <h4>Email</h4>
          {% for email in emails %}
          <p class="muted">{{ email.label }}</p>
          <a href="{{ email.href|href }}">{{ email.address }}</a>
          {% endfor %}
        </div>
        <div class="contact-item">
          <h4>Location</h4>
          <p>{{ location }}</p>
        </div>
      </div>
      <div class="card">
        <h3>Business Hours</h3>
        <dl class="hours">
        {% for slot in hours %}
          <dt>{{ slot.days }}</dt>
          <dd>{{ slot.time }}</dd>
        {% endfor %}
        </dl>
        <div class="quick-contact">
          <h4>Quick Contact</h4>
          <p>{{ quick_contact }}</p>
          <a href="{{ whatsapp.href|href }}" class="button button-whatsapp" target="_blank" rel="noopener noreferrer">Message on WhatsApp</a>
        </div>
      </div>
    </div>
  </div>
</section>"##;

const TEAM_TEMPLATE: &str = r##"<section class="section section-muted team">
  <div class="container">
    <h3 class="centered">Our Team</h3>
    <div class="grid grid-3">
    {% for member in members %}
      <article class="card team-member">
        <div class="avatar">{{ member.initials }}</div>
        <h4>{{ member.role }}</h4>
        <p class="muted">{{ member.description }}</p>
        <a href="{{ member.tel_href|href }}">{{ member.phone }}</a>
        <a href="{{ member.chat_href|href }}" target="_blank" rel="noopener noreferrer">WhatsApp</a>
      </article>
    {% endfor %}
    </div>
  </div>
</section>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="site-footer">
  <div class="container centered">
    <h3>{{ company.short_name }}</h3>
    <p>{{ company.tagline }}</p>
    <p class="copyright">&copy; {{ company.copyright_year }} {{ company.short_name }}. All rights reserved.</p>
  </div>
</footer>"##;
