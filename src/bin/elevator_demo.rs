use elevator::services::{DispatchService, FloorRange, ParseLayer};
use elevator::{
    BitVecStopSet, BitmaskStopSet, BuildingConfig, Direction, Dispatcher, FlagStopSet, Floor,
    StopSet, StopSetKind,
};
use log::{info, warn};
use std::env;
use tower::{Service, ServiceBuilder, ServiceExt};

const CONFIG_ENV: &str = "ELEVATOR_CONFIG";

const DEFAULT_REQUESTS: [&str; 4] = ["U3", "D7", "U2", "U8"];

/// Floor for car `index` when `cars` cars are spread evenly over the shaft.
fn starting_floor(config: &BuildingConfig, index: usize) -> Floor {
    let span = i64::from(config.max_floor) - i64::from(config.min_floor);
    let offset = span * index as i64 / config.cars as i64;
    config.min_floor + offset as Floor
}

async fn run<S: StopSet>(config: &BuildingConfig, tokens: &[String]) -> anyhow::Result<()> {
    let mut dispatcher = Dispatcher::<S>::from_config(config)?;
    for index in 0..config.cars {
        if let Some(car) = dispatcher.car_mut(index) {
            car.place(starting_floor(config, index), Direction::Idle)?;
        }
    }
    print!("{}", dispatcher.status());

    let mut svc = ServiceBuilder::new()
        .layer(ParseLayer)
        .filter(FloorRange::from_config(config))
        .service(DispatchService::new(&mut dispatcher));

    for token in tokens {
        let ready = ServiceExt::<&str>::ready(&mut svc)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        match ready.call(token.as_str()).await {
            Ok(car) => println!("dispatched {token} -> {car}"),
            Err(e) => warn!("skipping {token}: {e}"),
        }
    }
    drop(svc);

    let mut interval = tokio::time::interval(config.tick_interval());
    for tick in 1..=config.max_ticks {
        if dispatcher.all_idle() {
            info!("all cars idle after {} steps", tick - 1);
            break;
        }
        interval.tick().await;
        for outcome in dispatcher.step_all() {
            println!("step {tick:3}: {outcome}");
        }
    }
    if !dispatcher.all_idle() {
        warn!("stopped after {} steps with requests pending", config.max_ticks);
    }
    print!("{}", dispatcher.status());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::var(CONFIG_ENV) {
        Ok(path) => BuildingConfig::load(path)?,
        Err(_) => BuildingConfig::default(),
    };
    config.validate()?;
    info!(
        "{} cars, floors {}..={}, {:?} stop sets",
        config.cars, config.min_floor, config.max_floor, config.stop_set
    );

    let mut tokens: Vec<String> = env::args().skip(1).collect();
    if tokens.is_empty() {
        tokens = DEFAULT_REQUESTS.iter().map(|t| t.to_string()).collect();
    }

    match config.stop_set {
        StopSetKind::Flags => run::<FlagStopSet>(&config, &tokens).await,
        StopSetKind::Bitmask => run::<BitmaskStopSet>(&config, &tokens).await,
        StopSetKind::BitVec => run::<BitVecStopSet>(&config, &tokens).await,
    }
}
