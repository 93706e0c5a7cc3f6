use gtk4 as gtk;
use gtk::gdk;
use log::warn;

// Palette: brand #128C7E / #075E54 / #25D366, surfaces #0B141A / #111B21 / #1F2C33.
const STYLESHEET: &str = r#"
window, .chat-root { background-color: #0B141A; }
.sidebar { background-color: #111B21; }
.sidebar list { background-color: transparent; }

.brand-badge {
    background-color: alpha(#128C7E, 0.1);
    color: #128C7E;
    border-radius: 16px;
    min-width: 48px;
    min-height: 48px;
    font-size: 18px;
    font-weight: bold;
}
.brand-kicker { color: #128C7E; font-size: 11px; font-weight: bold; letter-spacing: 3px; }
.brand-tagline { color: alpha(#99f6e4, 0.7); font-size: 12px; }

.conversation-row { border-radius: 16px; padding: 12px; }
.conversation-row.active { background-color: alpha(#128C7E, 0.2); }
.last-seen { color: alpha(white, 0.5); font-size: 11px; }
.preview { color: alpha(white, 0.6); font-size: 12px; }
.unread-badge {
    background-color: #128C7E;
    color: white;
    border-radius: 999px;
    min-width: 24px;
    min-height: 24px;
    font-size: 12px;
    font-weight: bold;
}

.chat-header { background-color: alpha(#111B21, 0.6); padding: 18px 24px; }
.chat-status { color: alpha(#a7f3d0, 0.8); }
.header-actions { color: alpha(white, 0.4); font-size: 11px; font-weight: bold; letter-spacing: 2px; }

.bubble { border-radius: 20px; padding: 12px 16px; }
.bubble.incoming { background-color: #202C33; color: alpha(white, 0.9); border-bottom-left-radius: 6px; }
.bubble.outgoing { background-color: #005C4B; color: #d1fae5; border-bottom-right-radius: 6px; }
.bubble-meta { color: alpha(white, 0.4); font-size: 10px; letter-spacing: 2px; }

.composer { background-color: alpha(#1F2C33, 0.8); border-radius: 24px; padding: 12px 16px; }
.composer textview, .composer text { background-color: transparent; color: white; }
.composer-placeholder { color: alpha(white, 0.3); }
.send-button { background-color: #128C7E; color: white; border-radius: 16px; }
.send-button:hover { background-color: #075E54; }
.footer-tagline { color: alpha(white, 0.3); font-size: 10px; letter-spacing: 3px; }
"#;

pub fn install() {
    adw::StyleManager::default().set_color_scheme(adw::ColorScheme::ForceDark);

    let Some(display) = gdk::Display::default() else {
        warn!("no display, skipping stylesheet");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLESHEET);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
