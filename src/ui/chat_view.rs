use gtk4::prelude::*;
use gtk4 as gtk;
use gtk::{gdk, glib};
use std::cell::RefCell;
use std::rc::Rc;

use crate::avatar::AvatarCache;
use crate::motion::{self, Entrances};
use crate::view::{self, Bubble, Header, MainPane};

const WELCOME: &str = "welcome";
const CHAT: &str = "chat";

pub struct ChatView {
    root: gtk::Stack,
    avatar: adw::Avatar,
    name: gtk::Label,
    status: gtk::Label,
    about: gtk::Label,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
    composer: gtk::TextView,
    send_btn: gtk::Button,
    animate: bool,
    entrances: RefCell<Entrances>,
    animations: RefCell<Vec<adw::Animation>>,
}

impl ChatView {
    pub fn new(animate: bool) -> Self {
        let root = gtk::Stack::new();
        root.set_hexpand(true);
        root.set_vexpand(true);
        root.add_css_class("chat-root");
        root.add_named(&welcome_page(animate), Some(WELCOME));

        let page = gtk::Box::new(gtk::Orientation::Vertical, 0);

        // Header
        let header = gtk::Box::new(gtk::Orientation::Horizontal, 16);
        header.add_css_class("chat-header");
        let avatar = adw::Avatar::new(48, None, true);
        header.append(&avatar);
        let titles = gtk::Box::new(gtk::Orientation::Vertical, 2);
        titles.set_hexpand(true);
        let name = gtk::Label::new(None);
        name.add_css_class("title-3");
        let status = gtk::Label::new(None);
        status.add_css_class("chat-status");
        let about = gtk::Label::new(None);
        about.add_css_class("dim-label");
        about.add_css_class("caption");
        for label in [&name, &status, &about] {
            label.set_halign(gtk::Align::Start);
            titles.append(label);
        }
        header.append(&titles);
        let actions = gtk::Label::new(Some("VOICE   VIDEO   PIN"));
        actions.add_css_class("header-actions");
        actions.set_valign(gtk::Align::Start);
        header.append(&actions);
        page.append(&header);
        page.append(&gtk::Separator::new(gtk::Orientation::Horizontal));

        // Transcript
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 18);
        messages_box.set_margin_top(24);
        messages_box.set_margin_bottom(24);
        messages_box.set_margin_start(24);
        messages_box.set_margin_end(24);
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .child(&messages_box)
            .build();
        page.append(&scroller);

        // Composer
        let footer = gtk::Box::new(gtk::Orientation::Vertical, 8);
        footer.set_margin_top(16);
        footer.set_margin_bottom(20);
        footer.set_margin_start(24);
        footer.set_margin_end(24);
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        input_row.add_css_class("composer");
        let composer = gtk::TextView::new();
        composer.set_hexpand(true);
        composer.set_wrap_mode(gtk::WrapMode::WordChar);
        composer.set_accepts_tab(false);
        let composer_overlay = gtk::Overlay::new();
        composer_overlay.set_hexpand(true);
        composer_overlay.set_child(Some(&composer));
        let placeholder = gtk::Label::new(Some("Send a message"));
        placeholder.add_css_class("composer-placeholder");
        placeholder.set_halign(gtk::Align::Start);
        placeholder.set_valign(gtk::Align::Start);
        placeholder.set_can_target(false);
        composer_overlay.add_overlay(&placeholder);
        composer.buffer().connect_changed(move |buf| {
            placeholder.set_visible(view::composer_placeholder_visible(&buffer_text(buf)));
        });
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("send-button");
        send_btn.set_valign(gtk::Align::End);
        send_btn.set_tooltip_text(Some("Send message"));
        input_row.append(&composer_overlay);
        input_row.append(&send_btn);
        footer.append(&input_row);
        let tagline = gtk::Label::new(Some(
            "MUSTAFIZUR CHAT • ENCRYPTED BY DESIGN • INSPIRED BY THE FLOW OF WHATSAPP",
        ));
        tagline.add_css_class("footer-tagline");
        tagline.set_halign(gtk::Align::Start);
        footer.append(&tagline);
        page.append(&footer);

        root.add_named(&page, Some(CHAT));

        Self {
            root,
            avatar,
            name,
            status,
            about,
            scroller,
            messages_box,
            composer,
            send_btn,
            animate,
            entrances: RefCell::new(Entrances::default()),
            animations: RefCell::new(Vec::new()),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn connect_compose<F: Fn(String) + 'static>(&self, f: F) {
        self.composer.buffer().connect_changed(move |buf| f(buffer_text(buf)));
    }

    pub fn connect_send<F: Fn() + 'static>(&self, f: F) {
        self.send_btn.connect_clicked(move |_| f());
    }

    /// `f` gets (enter, shift) and returns true when it consumed the key.
    pub fn connect_key<F: Fn(bool, bool) -> bool + 'static>(&self, f: F) {
        let keys = gtk::EventControllerKey::new();
        keys.connect_key_pressed(move |_, key, _, state| {
            let enter = matches!(key, gdk::Key::Return | gdk::Key::KP_Enter);
            let shift = state.contains(gdk::ModifierType::SHIFT_MASK);
            if f(enter, shift) {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        self.composer.add_controller(keys);
    }

    pub fn show(&self, pane: MainPane, draft: &str, avatars: &AvatarCache<gdk::Texture>) {
        match pane {
            MainPane::Welcome => self.root.set_visible_child_name(WELCOME),
            MainPane::Conversation { header, bubbles } => {
                self.set_header(&header, avatars);
                self.set_bubbles(&bubbles);
                self.root.set_visible_child_name(CHAT);
            }
        }

        let buffer = self.composer.buffer();
        if buffer_text(&buffer) != draft {
            buffer.set_text(draft);
        }
    }

    fn set_header(&self, header: &Header, avatars: &AvatarCache<gdk::Texture>) {
        self.avatar.set_text(Some(&header.name));
        self.avatar.set_custom_image(avatars.ready(&header.avatar));
        self.name.set_label(&header.name);
        self.status.set_label(&header.status);
        self.about.set_label(&header.about);
    }

    fn set_bubbles(&self, bubbles: &[Bubble]) {
        let entering = self
            .entrances
            .borrow_mut()
            .update(bubbles.iter().map(|b| b.id.as_str()));
        let mut animations = self.animations.borrow_mut();
        animations.clear();

        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }
        for bubble in bubbles {
            let widget = bubble_widget(bubble);
            self.messages_box.append(&widget);
            if self.animate && entering.contains(&bubble.id) {
                let offset = motion::bubble_offset(bubble.outgoing);
                animations.push(crate::ui::motion::enter(&widget, motion::bubble_spring(), offset));
            }
        }
        let scroller = self.scroller.clone();
        glib::idle_add_local_once(move || {
            let adj = scroller.vadjustment();
            adj.set_value(adj.upper());
        });
    }
}

fn bubble_widget(bubble: &Bubble) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    let card = gtk::Box::new(gtk::Orientation::Vertical, 8);
    card.add_css_class("bubble");
    if bubble.outgoing {
        card.add_css_class("outgoing");
        row.set_halign(gtk::Align::End);
    } else {
        card.add_css_class("incoming");
        row.set_halign(gtk::Align::Start);
    }

    let text = gtk::Label::new(Some(&bubble.content));
    text.set_wrap(true);
    text.set_selectable(true);
    text.set_xalign(0.0);
    text.set_max_width_chars(48);
    card.append(&text);

    let meta = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    meta.set_halign(gtk::Align::End);
    let time = gtk::Label::new(Some(&bubble.time));
    time.add_css_class("bubble-meta");
    meta.append(&time);
    if let Some(tag) = bubble.delivery {
        let delivery = gtk::Label::new(Some(tag));
        delivery.add_css_class("bubble-meta");
        meta.append(&delivery);
    }
    card.append(&meta);

    row.append(&card);
    row
}

fn buffer_text(buf: &gtk::TextBuffer) -> String {
    buf.text(&buf.start_iter(), &buf.end_iter(), false).to_string()
}

fn welcome_page(animate: bool) -> gtk::Box {
    let page = gtk::Box::new(gtk::Orientation::Vertical, 18);
    page.set_valign(gtk::Align::Center);
    page.set_halign(gtk::Align::Center);

    let sparkle = gtk::Label::new(Some("✨"));
    sparkle.add_css_class("title-1");
    if animate {
        // Replays whenever the welcome page comes into view.
        let playing: Rc<RefCell<Option<adw::Animation>>> = Rc::default();
        sparkle.connect_map(move |badge| {
            playing.replace(Some(crate::ui::motion::enter(badge, motion::welcome_spring(), 0)));
        });
    }
    page.append(&sparkle);

    let title = gtk::Label::new(Some("Welcome to mustafizur chat"));
    title.add_css_class("title-2");
    page.append(&title);

    let body = gtk::Label::new(Some(
        "Select a chat from the left to start a conversation. Your messages stay private and synced across devices instantly.",
    ));
    body.add_css_class("dim-label");
    body.set_wrap(true);
    body.set_max_width_chars(40);
    body.set_justify(gtk::Justification::Center);
    page.append(&body);

    page
}
