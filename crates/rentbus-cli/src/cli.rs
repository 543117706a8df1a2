//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use rentbus_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rentbus")]
#[command(author = "rentanybus")]
#[command(version)]
#[command(about = "Bus rental catalog and back-office")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding the tables and local state. Uses config value if not specified.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the fleet and manage vehicles
    Vehicles {
        #[command(subcommand)]
        action: VehicleCommand,
    },

    /// Manage bus operators (admin)
    Operators {
        #[command(subcommand)]
        action: OperatorCommand,
    },

    /// Rental inquiries
    Inquiries {
        #[command(subcommand)]
        action: InquiryCommand,
    },

    /// Bus owner partnership leads
    OwnerLeads {
        #[command(subcommand)]
        action: OwnerLeadCommand,
    },

    /// Blog posts
    Blog {
        #[command(subcommand)]
        action: BlogCommand,
    },

    /// Site settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Back-office headline numbers (admin)
    Dashboard,

    /// Admin session
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set blog page size
        #[arg(long)]
        set_page_size: Option<usize>,

        /// Set store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set admin login email
        #[arg(long)]
        set_admin_email: Option<String>,

        /// Set admin password (stored as a SHA-256 digest)
        #[arg(long)]
        set_admin_password: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Search and filter the catalog
    ///
    /// Unknown filter values are treated as "all".
    List {
        /// Case-insensitive search over name and description
        #[arg(long, short = 'q')]
        search: Option<String>,

        /// Vehicle type (bus, traveller)
        #[arg(long = "type")]
        vehicle_type: Option<String>,

        /// AC category (ac, non-ac)
        #[arg(long)]
        category: Option<String>,

        /// Seating band (1-15, 16-30, 31-50, 50+)
        #[arg(long)]
        capacity: Option<String>,

        /// Availability (available, limited)
        #[arg(long)]
        availability: Option<String>,

        /// Sort order (recommended, price_low_to_high, price_high_to_low,
        /// capacity_low_to_high, capacity_high_to_low)
        #[arg(long, short = 's')]
        sort: Option<String>,
    },

    /// Show one vehicle with similar options
    Show {
        id: String,
    },

    /// Vehicles available right now
    Featured {
        #[arg(long, short = 'n', default_value_t = 3)]
        count: usize,
    },

    /// Vehicle counts per homepage category
    Categories,

    /// Add a vehicle (admin)
    Add {
        #[command(flatten)]
        fields: VehicleFields,

        /// Keep the vehicle in local state instead of the vehicles table
        #[arg(long)]
        local: bool,
    },

    /// Edit a vehicle (admin); omitted fields keep their value
    Update {
        id: String,

        #[command(flatten)]
        fields: VehicleFields,
    },

    /// Delete a vehicle (admin)
    Delete {
        id: String,

        /// Remove a vehicle kept in local state
        #[arg(long)]
        local: bool,
    },

    /// Import vehicles from a CSV or TOML fleet file (admin)
    Import {
        file: PathBuf,
    },

    /// Load the starter fleet; vehicles already present are skipped (admin)
    Seed,
}

/// Vehicle editor fields. List fields are comma-separated.
#[derive(Args, Default)]
pub struct VehicleFields {
    #[arg(long)]
    pub name: Option<String>,

    /// bus or traveller
    #[arg(long = "type")]
    pub vehicle_type: Option<String>,

    /// Air conditioned (true/false)
    #[arg(long)]
    pub ac: Option<bool>,

    #[arg(long)]
    pub seats: Option<String>,

    /// Price label, e.g. "₹18,000"
    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub amenities: Option<String>,

    #[arg(long)]
    pub images: Option<String>,

    #[arg(long)]
    pub ideal_for: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// available, limited or booked
    #[arg(long)]
    pub availability: Option<String>,

    /// 2x1, 1x2 or 2x2
    #[arg(long)]
    pub layout: Option<String>,

    /// Operator ID, or "none"
    #[arg(long)]
    pub operator: Option<String>,

    #[arg(long)]
    pub agent_contact: Option<String>,
}

#[derive(Subcommand)]
pub enum OperatorCommand {
    /// List operators, newest first
    List,

    /// Register an operator
    Add {
        #[command(flatten)]
        fields: OperatorFields,
    },

    /// Edit an operator; omitted fields keep their value
    Update {
        id: String,

        #[command(flatten)]
        fields: OperatorFields,
    },
}

#[derive(Args, Default)]
pub struct OperatorFields {
    #[arg(long)]
    pub business_name: Option<String>,

    #[arg(long)]
    pub contact_person: Option<String>,

    #[arg(long)]
    pub contact_number: Option<String>,

    /// Street address; combined with --city
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Subcommand)]
pub enum InquiryCommand {
    /// List inquiries (admin)
    List {
        /// new, contacted, quoted, converted, closed, lost or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Submit a rental inquiry
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        mobile: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        vehicle_type: Option<String>,

        #[arg(long)]
        vehicle: Option<String>,

        /// Journey start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,

        #[arg(long)]
        end_date: Option<String>,

        #[arg(long)]
        pickup: Option<String>,

        #[arg(long)]
        drop: Option<String>,

        #[arg(long, default_value = "")]
        passengers: String,

        #[arg(long)]
        message: Option<String>,
    },

    /// Move an inquiry through the pipeline (admin)
    SetStatus {
        id: String,
        status: String,
    },

    /// Replace the internal notes on an inquiry (admin)
    Notes {
        id: String,
        text: String,
    },
}

#[derive(Subcommand)]
pub enum OwnerLeadCommand {
    /// List owner leads (admin)
    List {
        /// new, contacted, onboarded, rejected or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Submit a partnership request
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        mobile: String,

        #[arg(long)]
        city: String,

        /// Fleet description, e.g. "2 x 40 seater"
        #[arg(long)]
        details: Option<String>,
    },

    /// Update a lead status (admin)
    SetStatus {
        id: String,
        status: String,
    },
}

#[derive(Subcommand)]
pub enum BlogCommand {
    /// List published posts, or every post with --all (admin)
    List {
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,

        #[arg(long)]
        all: bool,
    },

    /// Show a post by slug
    Show {
        slug: String,
    },

    /// Write a post (admin)
    Create {
        #[arg(long)]
        title: String,

        /// Post body
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the post body from a file
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        excerpt: Option<String>,

        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        author: Option<String>,

        /// Category ID (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Tag ID (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Publish immediately
        #[arg(long)]
        publish: bool,
    },

    /// Publish a draft (admin)
    Publish {
        id: String,
    },

    /// Delete a post (admin)
    Delete {
        id: String,
    },

    /// List authors, categories and tags
    Taxonomy,

    /// Add an author (admin)
    AddAuthor {
        name: String,

        #[arg(long)]
        bio: Option<String>,
    },

    /// Add a category (admin)
    AddCategory {
        name: String,
    },

    /// Add a tag (admin)
    AddTag {
        name: String,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show or edit the homepage blog section
    Blog {
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        #[arg(long)]
        disable: bool,

        #[arg(long)]
        set_title: Option<String>,

        #[arg(long)]
        set_subtitle: Option<String>,

        #[arg(long)]
        set_limit: Option<u32>,
    },

    /// Print a raw setting value
    Get {
        key: String,
    },

    /// Store a raw JSON setting value (admin)
    Set {
        key: String,
        value: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Log in to the back-office
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// End the admin session
    Logout,

    /// Show whether an admin session is active
    Status,
}
