use std::sync::{Arc, Mutex};

use pouch_config::{Config, ConfigProvider};
use pouch_di::{Container, Definition, Entry};
use rand::Rng;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SessionStorage {
    class: Arc<String>,
    cookie_name: Arc<String>,
}

#[derive(Debug)]
struct Session {
    storage: Arc<SessionStorage>,
}

#[derive(Debug)]
struct Logger {
    file: Arc<String>,
    lines: Mutex<Vec<String>>,
}
impl Logger {
    fn log(&self, line: impl Into<String>) {
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push(line.into());
    }
}

#[derive(Debug, Clone, Default)]
struct Mailer {
    from: Option<String>,
}

#[derive(Debug, Clone)]
struct TemplateEngine {
    loader: String,
    debug: bool,
    extensions: Vec<String>,
}

#[derive(Debug)]
struct Cache {
    capacity: usize,
}

struct MailConfig {
    default_address: String,
}

struct TwigConfig {
    loader: String,
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut configs = ConfigProvider::new();
    configs
        .add_config(MailConfig {
            default_address: "noreply@example.com".into(),
        })?
        .add_config(TwigConfig {
            loader: "templates/".into(),
            debug: cfg!(debug_assertions),
        })?;

    let mut container = Container::new();
    configs.install(&mut container);

    // Parameters
    container.set("cookie_name", Entry::parameter("SESSION_ID".to_string()));
    container.set("session_storage_class", Entry::parameter("SessionStorage".to_string()));
    container.set("log_file", Entry::parameter("/tmp/bootstrap.log".to_string()));
    container.set("cache_capacity", Entry::parameter(128_usize));

    // Services
    container.set(
        "session_storage",
        Entry::service(|c| {
            Ok(SessionStorage {
                class: c.get("session_storage_class")?,
                cookie_name: c.get("cookie_name")?,
            })
        }),
    );
    container.set(
        "session",
        Entry::service(|c| {
            Ok(Session {
                storage: c.get("session_storage")?,
            })
        }),
    );

    // Shared services
    container.set(
        "log",
        Container::share(Entry::service(|c| {
            Ok(Logger {
                file: c.get("log_file")?,
                lines: Mutex::default(),
            })
        }))?,
    );

    // A callable stored as a parameter instead of a service
    container.set(
        "random",
        Container::protect(Entry::service(|_| Ok(rand::thread_rng().gen_range(0..=100_u32))))?,
    );

    // Modifying services after creation
    container.set("mail", Entry::service(|_| Ok(Mailer::default())));
    container.extend("mail", |mail: Arc<Mailer>, c| {
        let mut mail = Mailer::clone(&mail);
        mail.from = Some(Config::<MailConfig>::load(c)?.default_address.clone());
        Ok(mail)
    })?;

    // Modifying shared services after creation
    container.set(
        "twig",
        Container::share(Entry::service(|c| {
            let config = Config::<TwigConfig>::load(c)?;
            Ok(TemplateEngine {
                loader: config.loader.clone(),
                debug: config.debug,
                extensions: vec![],
            })
        }))?,
    );
    let extended = container.extend("twig", |twig: Arc<TemplateEngine>, _| {
        let mut twig = TemplateEngine::clone(&twig);
        twig.extensions.push("MyTwigExtension".into());
        Ok(twig)
    })?;
    container.set("twig", Container::share(extended)?);

    // Fetching a service definition without executing it
    container.set(
        "cache",
        Container::share(Entry::service(|c| {
            Ok(Cache {
                capacity: *c.get::<usize>("cache_capacity")?,
            })
        }))?,
    );
    let cache_definition = container.raw("cache")?;

    tracing::info!("Bootstrapped container: {:?}", container);

    let session = container.get::<Session>("session")?;
    println!(
        "session uses {} with cookie '{}'",
        session.storage.class, session.storage.cookie_name
    );

    let log = container.get::<Logger>("log")?;
    log.log("bootstrap done");
    let same_log = container.get::<Logger>("log")?;
    println!(
        "log '{}' is shared: {} ({} lines)",
        log.file,
        Arc::ptr_eq(&log, &same_log),
        same_log.lines.lock().map(|lines| lines.len()).unwrap_or_default()
    );

    let random = container.get::<Definition>("random")?;
    println!(
        "random numbers: {} {}",
        random.call_as::<u32>(&container)?,
        random.call_as::<u32>(&container)?
    );

    let mail = container.get::<Mailer>("mail")?;
    println!("mail from: {:?}", mail.from);

    let twig = container.get::<TemplateEngine>("twig")?;
    println!(
        "twig loads from '{}' (debug: {}) with extensions {:?}",
        twig.loader, twig.debug, twig.extensions
    );

    println!(
        "cache definition is a {}, capacity {}",
        cache_definition.kind(),
        container.get::<Cache>("cache")?.capacity
    );

    println!("defined: {}", container.keys().join(", "));
    println!("done bootstrap.");

    Ok(())
}
