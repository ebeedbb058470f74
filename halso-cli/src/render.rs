//! Plain-text tables for terminal output

use halso_client::{Toast, ToastLevel, Toaster, WeeklySchedule};
use shared::models::{
    BadgeTone, BlogPost, ClassRegistration, DashboardStats, Facility, GymClass, Member,
    MemberSubscription, SubscriptionPlan, User,
};

/// A record printable as one table row
pub trait Row {
    const HEADERS: &'static [&'static str];

    /// One cell per header
    fn cells(&self) -> Vec<String>;
}

/// Column-aligned text table
struct Table {
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &'static [&'static str]) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn print(&self) {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: Vec<&str>| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect();
            println!("{}", padded.join("  ").trim_end());
        };

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        line(self.headers.to_vec());
        line(rule.iter().map(String::as_str).collect());
        for row in &self.rows {
            line(row.iter().map(String::as_str).collect());
        }
        if self.rows.is_empty() {
            println!("(no rows)");
        }
    }
}

pub fn table<T: Row>(items: &[&T]) {
    let mut table = Table::new(T::HEADERS);
    for item in items {
        table.row(item.cells());
    }
    table.print();
}

/// One record as `HEADER  value` lines
pub fn record<T: Row>(item: &T) {
    let width = T::HEADERS.iter().map(|h| h.len()).max().unwrap_or(0);
    for (header, cell) in T::HEADERS.iter().zip(item.cells()) {
        println!("{:<width$}  {}", header, cell, width = width);
    }
}

/// Status cell with a marker for its badge tone
pub fn badge(label: &str, tone: BadgeTone) -> String {
    let marker = match tone {
        BadgeTone::Success => '+',
        BadgeTone::Warning => '!',
        BadgeTone::Danger => 'x',
        BadgeTone::Neutral => '-',
    };
    format!("{marker} {label}")
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

impl Row for Member {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "PHONE", "STATUS", "JOINED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            or_dash(self.phone.as_deref()),
            badge(self.membership_status.label(), self.membership_status.badge()),
            self.join_date.clone(),
        ]
    }
}

impl Row for SubscriptionPlan {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "PRICE", "DAYS", "ACTIVE", "FEATURES"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("{:.2}", self.price),
            self.duration.to_string(),
            yes_no(self.is_active),
            self.features.join(", "),
        ]
    }
}

impl Row for MemberSubscription {
    const HEADERS: &'static [&'static str] =
        &["ID", "MEMBER", "PLAN", "STATUS", "PAYMENT", "START", "END"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.member_id.to_string(),
            self.plan_id.to_string(),
            badge(self.status.label(), self.status.badge()),
            badge(self.payment_status.label(), self.payment_status.badge()),
            or_dash(self.start_date.as_deref()),
            or_dash(self.end_date.as_deref()),
        ]
    }
}

impl Row for Facility {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ADDRESS", "CITY", "STATUS", "MEMBERS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.address.clone(),
            self.city.clone(),
            badge(self.status.label(), self.status.badge()),
            self.member_count.to_string(),
        ]
    }
}

impl Row for User {
    const HEADERS: &'static [&'static str] = &["ID", "USERNAME", "EMAIL", "ROLE", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.email.clone(),
            self.role.label().to_string(),
            yes_no(self.is_active),
        ]
    }
}

impl Row for BlogPost {
    const HEADERS: &'static [&'static str] = &["ID", "TITLE", "AUTHOR", "STATUS", "PUBLISHED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            or_dash(self.author.as_deref()),
            badge(self.status.label(), self.status.badge()),
            or_dash(self.published_at.as_deref()),
        ]
    }
}

impl Row for GymClass {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "DAY", "TIME", "INSTRUCTOR", "BOOKED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.weekday().map_or("?", |d| d.name()).to_string(),
            format!("{}-{}", self.start_time, self.end_time),
            or_dash(self.instructor.as_deref()),
            format!("{}/{}", self.enrolled, self.capacity),
        ]
    }
}

impl Row for ClassRegistration {
    const HEADERS: &'static [&'static str] = &["ID", "MEMBER", "NAME", "REGISTERED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.member_id.to_string(),
            or_dash(self.member_name.as_deref()),
            or_dash(self.registered_at.as_deref()),
        ]
    }
}

/// Borrowed view of an owned slice, for [`table`]
pub fn all<T>(items: &[T]) -> Vec<&T> {
    items.iter().collect()
}

pub fn schedule(schedule: &WeeklySchedule) {
    for (day, classes) in schedule.week() {
        if classes.is_empty() {
            continue;
        }
        println!("{}", day.name());
        for c in classes {
            println!(
                "  {}-{}  {}  ({} spots left)",
                c.start_time,
                c.end_time,
                c.name,
                c.spots_left()
            );
        }
    }
    if schedule.is_empty() {
        println!("No classes scheduled");
    }
}

pub fn stats(stats: &DashboardStats) {
    println!("Members:               {} ({} active)", stats.total_members, stats.active_members);
    println!("Facilities:            {}", stats.total_facilities);
    println!("Classes:               {}", stats.total_classes);
    println!("Active subscriptions:  {}", stats.active_subscriptions);
    if !stats.recent_members.is_empty() {
        println!();
        println!("Recent members");
        table(&all(&stats.recent_members));
    }
    if !stats.recent_posts.is_empty() {
        println!();
        println!("Recent posts");
        table(&all(&stats.recent_posts));
    }
}

/// Print and clear queued toasts; errors go to stderr
pub fn toasts(toaster: &mut Toaster) {
    for Toast { level, message, .. } in toaster.drain() {
        match level {
            ToastLevel::Success => println!("{}", message),
            ToastLevel::Error => eprintln!("error: {}", message),
        }
    }
}
