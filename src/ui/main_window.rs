use adw::prelude::*;
use adw::Application;
use gtk4::{gdk, gdk_pixbuf::Pixbuf, gio};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;

use crate::app::Settings;
use crate::avatar::{AvatarCache, AvatarLoader};
use crate::store::session::{submits, Intent, Session};
use crate::ui::chat_view::ChatView;
use crate::ui::sidebar::Sidebar;
use crate::view::{self, TimeFormat};

/// Owns the one live session and redraws both panes from it.
struct Shell {
    session: RefCell<Session>,
    sidebar: Sidebar,
    chat: ChatView,
    clock: TimeFormat,
    avatars: RefCell<AvatarCache<gdk::Texture>>,
}

impl Shell {
    fn dispatch(&self, intent: Intent) {
        // The composer already shows what the user typed.
        let redraw = match &intent {
            Intent::Compose(_) => false,
            Intent::KeyPress { enter, shift } => submits(*enter, *shift),
            _ => true,
        };
        let next = self.session.borrow().apply(intent);
        self.session.replace(next);
        if redraw {
            self.render();
        }
    }

    fn render(&self) {
        // Widget updates can re-enter dispatch, so no session borrow is held past here.
        let (rows, pane, draft) = {
            let session = self.session.borrow();
            (
                view::sidebar_rows(&session),
                view::main_pane(&session, self.clock),
                session.draft().to_string(),
            )
        };
        let avatars = self.avatars.borrow();
        self.sidebar.set_rows(rows, &avatars);
        self.chat.show(pane, &draft, &avatars);
    }
}

pub fn show_main_window(app: &Application, settings: Settings) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("mustafizur chat")
        .default_width(settings.window_width)
        .default_height(settings.window_height)
        .build();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Sidebar::new(settings.animations);
    split.set_flap(Some(&sidebar.widget()));
    let chat = ChatView::new(settings.animations);
    split.set_content(Some(&chat.widget()));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("mustafizur chat"));
    header.set_title_widget(Some(&title));
    container.append(&header);
    container.append(&split);
    window.set_content(Some(&container));

    let shell = Rc::new(Shell {
        session: RefCell::new(Session::new(settings.seed_store())),
        sidebar,
        chat,
        clock: settings.clock,
        avatars: RefCell::new(AvatarCache::default()),
    });

    {
        let shell_for_search = shell.clone();
        shell.sidebar.connect_search(move |term| shell_for_search.dispatch(Intent::Search(term)));
    }
    {
        let shell_for_select = shell.clone();
        shell.sidebar.connect_select(move |id| {
            // Rebuilding the list from inside its own row-activated handler is avoided.
            let shell = shell_for_select.clone();
            gtk4::glib::idle_add_local_once(move || shell.dispatch(Intent::Select(id)));
        });
    }
    {
        let shell_for_compose = shell.clone();
        shell.chat.connect_compose(move |draft| shell_for_compose.dispatch(Intent::Compose(draft)));
    }
    {
        let shell_for_send = shell.clone();
        shell.chat.connect_send(move || shell_for_send.dispatch(Intent::Send));
    }
    {
        let shell_for_key = shell.clone();
        shell.chat.connect_key(move |enter, shift| {
            shell_for_key.dispatch(Intent::KeyPress { enter, shift });
            submits(enter, shift)
        });
    }

    shell.render();
    if settings.load_avatars {
        load_avatars(&shell);
    }
    window.present();
}

fn load_avatars(shell: &Rc<Shell>) {
    let loader = match AvatarLoader::new() {
        Ok(loader) => loader,
        Err(e) => {
            warn!("avatars disabled: {e}");
            return;
        }
    };
    let urls: Vec<Url> = shell
        .session
        .borrow()
        .store()
        .iter()
        .map(|c| c.avatar.clone())
        .collect();

    for url in urls {
        if !shell.avatars.borrow_mut().request(&url) {
            continue;
        }
        let loader = loader.clone();
        let target = url.clone();
        let rx = crate::utils::run_async_to_main(async move { loader.fetch(&target).await });
        let shell = shell.clone();
        rx.attach(None, move |res| {
            let texture = match res {
                Ok(bytes) => decode(bytes),
                Err(e) => {
                    debug!("avatar {url} unavailable: {e}");
                    None
                }
            };
            shell.avatars.borrow_mut().resolve(&url, texture);
            shell.render();
            glib::ControlFlow::Continue
        });
    }
}

fn decode(bytes: Vec<u8>) -> Option<gdk::Texture> {
    let stream = gio::MemoryInputStream::from_bytes(&gtk4::glib::Bytes::from_owned(bytes));
    match Pixbuf::from_stream(&stream, gio::Cancellable::NONE) {
        Ok(pixbuf) => Some(gdk::Texture::for_pixbuf(&pixbuf)),
        Err(e) => {
            debug!("avatar image undecodable: {e}");
            None
        }
    }
}
