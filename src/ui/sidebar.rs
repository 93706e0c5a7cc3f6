use gtk4::prelude::*;
use gtk4 as gtk;
use gtk::{gdk, pango};
use std::cell::RefCell;

use crate::avatar::AvatarCache;
use crate::motion::{self, Entrances};
use crate::view::ConversationRow;

pub struct Sidebar {
    root: gtk::Box,
    search: gtk::SearchEntry,
    list: gtk::ListBox,
    animate: bool,
    entrances: RefCell<Entrances>,
    animations: RefCell<Vec<adw::Animation>>,
}

impl Sidebar {
    pub fn new(animate: bool) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
        root.add_css_class("sidebar");
        root.set_width_request(360);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        root.append(&brand_header());

        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some("Search conversations"));
        search.set_margin_start(12);
        search.set_margin_end(12);
        root.append(&search);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        list.set_activate_on_single_click(true);
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .child(&list)
            .build();
        root.append(&scroller);

        Self {
            root,
            search,
            list,
            animate,
            entrances: RefCell::new(Entrances::default()),
            animations: RefCell::new(Vec::new()),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn connect_search<F: Fn(String) + 'static>(&self, f: F) {
        self.search.connect_search_changed(move |entry| f(entry.text().to_string()));
    }

    /// Called with the conversation id of the clicked row.
    pub fn connect_select<F: Fn(String) + 'static>(&self, f: F) {
        self.list.connect_row_activated(move |_, row| f(row.widget_name().to_string()));
    }

    pub fn set_rows(&self, rows: Vec<ConversationRow>, avatars: &AvatarCache<gdk::Texture>) {
        let entering = self
            .entrances
            .borrow_mut()
            .update(rows.iter().map(|r| r.id.as_str()));
        let mut animations = self.animations.borrow_mut();
        animations.clear();

        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for item in rows {
            let row = conversation_row(&item, avatars);
            self.list.append(&row);
            if self.animate && entering.contains(&item.id) {
                animations.push(crate::ui::motion::enter(&row, motion::row_spring(), motion::ROW_OFFSET));
            }
        }
    }
}

fn brand_header() -> gtk::Box {
    let header = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    header.set_margin_top(16);
    header.set_margin_start(12);
    header.set_margin_end(12);

    let badge = gtk::Label::new(Some("MC"));
    badge.add_css_class("brand-badge");
    badge.set_valign(gtk::Align::Center);
    header.append(&badge);

    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    let kicker = gtk::Label::new(Some("MUSTAFIZUR"));
    kicker.add_css_class("brand-kicker");
    let title = gtk::Label::new(Some("mustafizur chat"));
    title.add_css_class("title-3");
    let tagline = gtk::Label::new(Some("Crafted for velocity and calm flow."));
    tagline.add_css_class("brand-tagline");
    for label in [&kicker, &title, &tagline] {
        label.set_halign(gtk::Align::Start);
        text.append(label);
    }
    header.append(&text);
    header
}

fn conversation_row(item: &ConversationRow, avatars: &AvatarCache<gdk::Texture>) -> gtk::ListBoxRow {
    let row = gtk::ListBoxRow::new();
    row.set_widget_name(&item.id);
    row.add_css_class("conversation-row");
    if item.active {
        row.add_css_class("active");
    }

    let content = gtk::Box::new(gtk::Orientation::Horizontal, 12);

    let avatar = adw::Avatar::new(48, Some(&item.name), true);
    if let Some(texture) = avatars.ready(&item.avatar) {
        avatar.set_custom_image(Some(texture));
    }
    content.append(&avatar);

    let text = gtk::Box::new(gtk::Orientation::Vertical, 4);
    text.set_hexpand(true);

    let top = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let name = gtk::Label::new(Some(&item.name));
    name.add_css_class("heading");
    name.set_hexpand(true);
    name.set_halign(gtk::Align::Start);
    let last_seen = gtk::Label::new(Some(&item.last_seen));
    last_seen.add_css_class("last-seen");
    top.append(&name);
    top.append(&last_seen);
    text.append(&top);

    let preview = gtk::Label::new(Some(&item.preview));
    preview.add_css_class("preview");
    preview.set_wrap(true);
    preview.set_lines(2);
    preview.set_ellipsize(pango::EllipsizeMode::End);
    preview.set_xalign(0.0);
    text.append(&preview);
    content.append(&text);

    if let Some(count) = &item.unread {
        let badge = gtk::Label::new(Some(count));
        badge.add_css_class("unread-badge");
        badge.set_valign(gtk::Align::Center);
        content.append(&badge);
    }

    row.set_child(Some(&content));
    row
}
